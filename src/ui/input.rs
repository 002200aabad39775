//! Keyboard mapping for the interactive display.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::constants::TIMER_INCREMENTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleSeconds,
    ToggleTheme,
    ToggleHourFormat,
    ToggleMode,
    ToggleOrientation,
    /// Add seconds to an idle timer.
    AddTime(u64),
    StartPause,
    Dismiss,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') => Some(Action::ToggleSeconds),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('h') => Some(Action::ToggleHourFormat),
        KeyCode::Char('m') => Some(Action::ToggleMode),
        KeyCode::Char('o') => Some(Action::ToggleOrientation),
        KeyCode::Char(' ') => Some(Action::StartPause),
        KeyCode::Enter => Some(Action::Dismiss),
        KeyCode::Char(digit @ '1'..='5') => {
            let index = digit as usize - '1' as usize;
            Some(Action::AddTime(TIMER_INCREMENTS[index].1))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_toggles() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('s'))),
            Some(Action::ToggleSeconds)
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('m'))),
            Some(Action::ToggleMode)
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('o'))),
            Some(Action::ToggleOrientation)
        );
    }

    #[test]
    fn test_increment_keys() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('1'))),
            Some(Action::AddTime(10))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('5'))),
            Some(Action::AddTime(3600))
        );
        assert_eq!(action_for_key(press(KeyCode::Char('6'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(action_for_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(key), None);
    }
}
