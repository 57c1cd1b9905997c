use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Mark current photo to keep
    Keep,
    /// Mark current photo to discard
    Discard,
    /// Undo last decision
    Undo,
    /// Show the transfer plan
    Plan,
    /// Ask to execute the transfer plan
    Execute,
    /// Confirm the transfer
    ConfirmTransfer,
    /// Cancel the transfer
    CancelTransfer,
    /// Write the decisions CSV
    Export,
    /// Rebuild the file index from disk
    Reload,
    /// Open current photo in the system viewer
    Open,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Keep: Right arrow or k
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Keep,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Keep,

        // Discard: Left arrow or d
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Discard,
        (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Discard,

        // Undo: u or Ctrl+Z
        (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Undo,
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => KeyAction::Undo,

        (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::Plan,
        (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::Execute,
        (KeyCode::Char('e'), KeyModifiers::NONE) => KeyAction::Export,
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reload,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,

        // Help: ?
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events to confirmation actions
/// Used when ViewState is ConfirmTransfer
pub fn handle_confirm_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Confirm: y or Enter
        (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::ConfirmTransfer,
        (KeyCode::Char('Y'), _) => KeyAction::ConfirmTransfer,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::ConfirmTransfer,

        // Cancel: n or Esc
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::CancelTransfer,
        (KeyCode::Char('N'), _) => KeyAction::CancelTransfer,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::CancelTransfer,

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_quit() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_key_keep() {
        assert_eq!(handle_key_event(key(KeyCode::Right)), KeyAction::Keep);
        assert_eq!(handle_key_event(key(KeyCode::Char('k'))), KeyAction::Keep);
    }

    #[test]
    fn test_key_discard() {
        assert_eq!(handle_key_event(key(KeyCode::Left)), KeyAction::Discard);
        assert_eq!(handle_key_event(key(KeyCode::Char('d'))), KeyAction::Discard);
    }

    #[test]
    fn test_key_undo() {
        assert_eq!(handle_key_event(key(KeyCode::Char('u'))), KeyAction::Undo);

        let ctrl_z = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_z), KeyAction::Undo);
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(handle_key_event(key(KeyCode::Char('p'))), KeyAction::Plan);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), KeyAction::Execute);
        assert_eq!(handle_key_event(key(KeyCode::Char('e'))), KeyAction::Export);
        assert_eq!(handle_key_event(key(KeyCode::Char('r'))), KeyAction::Reload);
        assert_eq!(handle_key_event(key(KeyCode::Char('o'))), KeyAction::Open);
        assert_eq!(handle_key_event(key(KeyCode::Char('?'))), KeyAction::Help);
    }

    #[test]
    fn test_key_none() {
        assert_eq!(handle_key_event(key(KeyCode::Char('z'))), KeyAction::None);
        assert_eq!(handle_key_event(key(KeyCode::Down)), KeyAction::None);
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('y'))), KeyAction::ConfirmTransfer);
        assert_eq!(handle_confirm_input(key(KeyCode::Enter)), KeyAction::ConfirmTransfer);

        let shift_y = KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT);
        assert_eq!(handle_confirm_input(shift_y), KeyAction::ConfirmTransfer);
    }

    #[test]
    fn test_cancel_keys() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('n'))), KeyAction::CancelTransfer);
        assert_eq!(handle_confirm_input(key(KeyCode::Esc)), KeyAction::CancelTransfer);
    }

    #[test]
    fn test_confirm_input_none() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('x'))), KeyAction::None);
        // Keep/discard keys must not confirm a transfer
        assert_eq!(handle_confirm_input(key(KeyCode::Char('k'))), KeyAction::None);
    }
}
