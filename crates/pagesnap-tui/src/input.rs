use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pagesnap_core::host::Key;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Destroy,
    Rebuild,
    PromptFragment,
    First,
    Last,
    ScrollDown,
    ScrollUp,
    JumpDot(usize), // 1-9, zero based
    Forward(Key),   // Delivered to the controller as a keydown
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if let Mode::Fragment(_) = app.mode {
        return handle_input_mode(key);
    }

    let binding = KeyBinding::new(key.code, key.modifiers);
    if let Some(action) = keymap.lookup(&binding) {
        return action.clone();
    }

    match (key.code, key.modifiers) {
        (KeyCode::Up, KeyModifiers::NONE) => Action::Forward(Key::ArrowUp),
        (KeyCode::Down, KeyModifiers::NONE) => Action::Forward(Key::ArrowDown),
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpDot(c as usize - '1' as usize)
        }
        (code, _) => match key_name(code) {
            Some(name) => Action::Forward(Key::Other(name)),
            None => Action::None,
        },
    }
}

/// Handle key events while the fragment prompt is open
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// DOM-style name for keys forwarded to the controller
fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Esc => "Escape",
        KeyCode::Backspace => "Backspace",
        KeyCode::F(n) => return Some(format!("F{n}")),
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Char('z')).as_deref(), Some("z"));
        assert_eq!(key_name(KeyCode::PageDown).as_deref(), Some("PageDown"));
        assert_eq!(key_name(KeyCode::F(2)).as_deref(), Some("F2"));
        assert_eq!(key_name(KeyCode::Null), None);
    }

    #[test]
    fn test_input_mode_keys() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(handle_input_mode(key(KeyCode::Enter)), Action::Confirm);
        assert_eq!(handle_input_mode(key(KeyCode::Char('a'))), Action::InputChar('a'));
        assert_eq!(handle_input_mode(key(KeyCode::Up)), Action::None);
    }
}
