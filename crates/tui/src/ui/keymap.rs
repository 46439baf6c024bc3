use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Interrupt,
    Cancel,
    NextPane,
    Activate,
    Backspace,
    Up,
    Down,
    Input(char),
    None,
}

/// Letters stay `Input` so the filter line can receive them; screens decide
/// what a bare letter means.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Interrupt,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab | KeyCode::BackTab => AppAction::NextPane,
        KeyCode::Enter => AppAction::Activate,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_interrupts_and_other_chords_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), AppAction::Interrupt);
        assert_eq!(map_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)), AppAction::None);
    }

    #[test]
    fn letters_are_passed_through() {
        assert_eq!(map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), AppAction::Input('q'));
        assert_eq!(map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)), AppAction::Input('A'));
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), AppAction::Activate);
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::NONE)), AppAction::NextPane);
    }
}
