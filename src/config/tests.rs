use super::builder::default_config_content;
use super::loading::parse_config;
use super::validation::{timer_preset_hidden, validate_config};
use super::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse(content: &str) -> Result<Config> {
    parse_config(content, Path::new("flipclock.toml"))
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.clock_configuration(), ClockConfiguration::default());
    assert_eq!(config.timer_seconds(), 0);
}

#[test]
fn test_defaults_match_documented_values() {
    let resolved = ClockConfiguration::default();
    assert!(!resolved.show_seconds);
    assert_eq!(resolved.theme, Theme::Dark);
    assert!(resolved.is_24_hour);
    assert_eq!(resolved.mode, ClockMode::Clock);
    assert_eq!(resolved.orientation, Orientation::Auto);
}

#[test]
fn test_full_config_parses() {
    let config = parse(
        r#"
show_seconds = true
theme = "light"
use_24_hour = false
mode = "timer"
orientation = "portrait"
timer_seconds = 300
"#,
    )
    .unwrap();

    let resolved = config.clock_configuration();
    assert!(resolved.show_seconds);
    assert_eq!(resolved.theme, Theme::Light);
    assert!(!resolved.is_24_hour);
    assert_eq!(resolved.mode, ClockMode::Timer);
    assert_eq!(resolved.orientation, Orientation::Portrait);
    assert_eq!(config.timer_seconds(), 300);
}

#[test]
fn test_partial_config_fills_defaults() {
    let config = parse("theme = \"light\"\n").unwrap();
    let resolved = config.clock_configuration();
    assert_eq!(resolved.theme, Theme::Light);
    assert_eq!(resolved.mode, ClockMode::Clock);
    assert!(resolved.is_24_hour);
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    let err = parse("theme = \"sepia\"\n").unwrap_err();
    assert!(format!("{err:?}").contains("Failed to parse config"));
}

#[test]
fn test_unknown_key_is_rejected() {
    assert!(parse("show_millis = true\n").is_err());
}

#[test]
fn test_timer_seconds_upper_bound() {
    let at_limit = Config {
        timer_seconds: Some(MAXIMUM_TIMER_SECONDS),
        ..Config::default()
    };
    assert!(validate_config(&at_limit).is_ok());

    let over_limit = Config {
        timer_seconds: Some(MAXIMUM_TIMER_SECONDS + 1),
        ..Config::default()
    };
    let err = validate_config(&over_limit).unwrap_err();
    assert!(err.to_string().contains("timer_seconds"));
}

#[test]
fn test_timer_preset_hidden_when_mode_is_clock_or_omitted() {
    let omitted = parse("timer_seconds = 60\n").unwrap();
    assert!(timer_preset_hidden(&omitted));

    let clock = parse("timer_seconds = 60\nmode = \"clock\"\n").unwrap();
    assert!(timer_preset_hidden(&clock));

    let timer = parse("timer_seconds = 60\nmode = \"timer\"\n").unwrap();
    assert!(!timer_preset_hidden(&timer));

    assert!(!timer_preset_hidden(&Config::default()));
}

#[test]
fn test_default_content_round_trips() {
    let content = default_config_content();
    assert!(content.contains("#[Display]"));
    assert!(content.contains("#[Mode]"));

    let config = parse(&content).unwrap();
    assert_eq!(config.clock_configuration(), ClockConfiguration::default());
    assert_eq!(config.timer_seconds(), DEFAULT_TIMER_SECONDS);
}

#[test]
fn test_default_content_aligns_comments() {
    let content = default_config_content();
    let columns: Vec<usize> = content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.is_empty())
        .filter_map(|line| line.find(" # "))
        .collect();
    assert!(!columns.is_empty());
    assert!(columns.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_load_from_path_missing_file_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("flipclock.toml");
    assert!(load_from_path(&missing).is_err());
    assert!(!missing.exists());
}

#[test]
fn test_load_from_path_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flipclock.toml");
    fs::write(&path, "show_seconds = true\nmode = \"timer\"\n").unwrap();

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.show_seconds, Some(true));
    assert_eq!(config.mode, Some(ClockMode::Timer));
}

#[test]
#[serial]
fn test_load_creates_default_config() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir
        .path()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.clock_configuration(), ClockConfiguration::default());
}

#[test]
fn test_toggles() {
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(ClockMode::Timer.toggled(), ClockMode::Clock);
    assert_eq!(Orientation::Auto.toggled(), Orientation::Portrait);
}
