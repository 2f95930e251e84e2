use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scout_core::action::Action;
use scout_core::config::keymap::Keymap;
use scout_core::nav::panes::Move;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Apply a cursor or directory move.
    Move(Move),
    /// Toggle the mark on the cursor entry.
    ToggleMark,
    /// Toggle the tag on the cursor entry.
    ToggleTag,
    /// Re-read all panes from disk.
    Reload,
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit the application.
    Quit,
    /// Append a character to the command line.
    CommandChar(char),
    /// Remove the last character from the command line.
    CommandBackspace,
    /// Run the command line.
    CommandConfirm,
    /// No action for this key.
    None,
}

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending_g: false }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_g
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
///
/// In Normal mode, character keys are resolved through the `Keymap`;
/// arrow keys, Enter and Ctrl+C are hardcoded. The command line is
/// hardcoded.
pub fn handle_key(
    key: KeyEvent,
    mode: &AppMode,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    match mode {
        AppMode::Normal => handle_normal_key(key, state, keymap),
        AppMode::Command(_) => handle_command_key(key),
    }
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    match action {
        Action::CursorUp => InputAction::Move(Move::Up),
        Action::CursorDown => InputAction::Move(Move::Down),
        Action::CursorTop => InputAction::Move(Move::Top),
        Action::CursorBottom => InputAction::Move(Move::Bottom),
        Action::GoParent => InputAction::Move(Move::Left),
        Action::EnterDir => InputAction::Move(Move::Right),
        Action::ToggleMark => InputAction::ToggleMark,
        Action::ToggleTag => InputAction::ToggleTag,
        Action::Reload => InputAction::Reload,
        Action::Quit => InputAction::Quit,
        Action::CommandLine | Action::Search | Action::Rename | Action::Shell => {
            let prefix = action.prompt_prefix().unwrap_or_default();
            InputAction::EnterMode(AppMode::Command(prefix.to_string()))
        }
    }
}

fn lookup(keymap: &Keymap, key: &str) -> InputAction {
    keymap
        .action_for_key(key)
        .map_or(InputAction::None, action_to_input_action)
}

fn handle_normal_key(
    key: KeyEvent,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    let new_state = InputState { pending_g: false };

    // Handle "gg" sequence
    if state.pending_g {
        return match key.code {
            KeyCode::Char('g') => (lookup(keymap, "gg"), new_state),
            _ => (InputAction::None, new_state),
        };
    }

    // Hardcoded keys: arrows, Enter, Ctrl+C (not remappable)
    let action = match key.code {
        KeyCode::Down => InputAction::Move(Move::Down),
        KeyCode::Up => InputAction::Move(Move::Up),
        KeyCode::Left => InputAction::Move(Move::Left),
        KeyCode::Right | KeyCode::Enter => InputAction::Move(Move::Right),
        KeyCode::Home => InputAction::Move(Move::Top),
        KeyCode::End => InputAction::Move(Move::Bottom),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('g') => {
            return (InputAction::None, InputState { pending_g: true });
        }
        KeyCode::Char(' ') => lookup(keymap, "Space"),
        // Look up character keys in the keymap
        KeyCode::Char(c) => lookup(keymap, &c.to_string()),
        _ => InputAction::None,
    };

    (action, new_state)
}

fn handle_command_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::EnterMode(AppMode::Normal)
        }
        KeyCode::Esc => InputAction::EnterMode(AppMode::Normal),
        KeyCode::Enter => InputAction::CommandConfirm,
        KeyCode::Backspace => InputAction::CommandBackspace,
        KeyCode::Char(c) => InputAction::CommandChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}
