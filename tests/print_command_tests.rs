//! `flipclock print` must write exactly one line to stdout.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn print_with_config_dir(dir: &Path) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_flipclock"))
        .arg("print")
        .arg("--config")
        .arg(dir)
        .arg("--simulate")
        .arg("2025-06-01 21:45:00")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_print_creates_config_silently() {
    let temp_dir = tempdir().unwrap();
    let config_dir = temp_dir.path().join("fresh");

    let stdout = print_with_config_dir(&config_dir);
    assert_eq!(stdout, "21:45\n");
    assert!(config_dir.join("flipclock.toml").exists());
}

#[test]
fn test_print_suppresses_validation_warning() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("flipclock.toml"),
        "timer_seconds = 60\nmode = \"clock\"\n",
    )
    .unwrap();

    assert_eq!(print_with_config_dir(temp_dir.path()), "21:45\n");
}

#[test]
fn test_print_timer_mode_line() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("flipclock.toml"),
        "timer_seconds = 300\nmode = \"timer\"\nshow_seconds = true\n",
    )
    .unwrap();

    assert_eq!(print_with_config_dir(temp_dir.path()), "00:05:00\n");
}

#[test]
fn test_print_broken_config_fails() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("flipclock.toml"), "theme = \"sepia\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_flipclock"))
        .arg("print")
        .arg("--config")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
}
