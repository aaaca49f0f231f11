use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    NextField,
    PrevField,
    Backspace,
    ClearField,
    Save,
    Input(char),
    None,
}

/// Every printable key is text input; commands live on Ctrl and Esc.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('s') => AppAction::Save,
            KeyCode::Char('u') => AppAction::ClearField,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Quit,
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => AppAction::NextField,
        KeyCode::BackTab | KeyCode::Up => AppAction::PrevField,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
