//! User-triggerable actions.
//!
//! Every key binding resolves to an [`Action`]. Actions are referenced in
//! `keymap.toml` by their snake-case identifier (see [`Action::id`]).

/// Every user-triggerable action in scout.
///
/// Variants carry no parameters; context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    GoParent,
    EnterDir,
    ToggleMark,
    ToggleTag,
    Reload,
    CommandLine,
    Search,
    Rename,
    Shell,
    Quit,
}

const ACTION_IDS: &[(Action, &str)] = &[
    (Action::CursorUp, "cursor_up"),
    (Action::CursorDown, "cursor_down"),
    (Action::CursorTop, "go_first"),
    (Action::CursorBottom, "go_last"),
    (Action::GoParent, "go_parent"),
    (Action::EnterDir, "enter_dir"),
    (Action::ToggleMark, "toggle_mark"),
    (Action::ToggleTag, "toggle_tag"),
    (Action::Reload, "reload"),
    (Action::CommandLine, "command_line"),
    (Action::Search, "search"),
    (Action::Rename, "rename"),
    (Action::Shell, "shell"),
    (Action::Quit, "quit"),
];

impl Action {
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub fn id(self) -> &'static str {
        ACTION_IDS
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, id)| *id)
            .unwrap_or("unknown")
    }

    /// Resolves an identifier back to its action.
    pub fn from_id(id: &str) -> Option<Self> {
        ACTION_IDS
            .iter()
            .find(|(_, known)| *known == id)
            .map(|(action, _)| *action)
    }

    /// The command-line prefix a prompt action opens with, if any.
    pub fn prompt_prefix(self) -> Option<&'static str> {
        match self {
            Self::CommandLine => Some(""),
            Self::Search => Some("search "),
            Self::Rename => Some("rename "),
            Self::Shell => Some("shell "),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_unique_id() {
        let mut ids: Vec<&str> = ACTION_IDS.iter().map(|(_, id)| *id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn id_round_trips_through_from_id() {
        for (action, id) in ACTION_IDS {
            assert_eq!(action.id(), *id);
            assert_eq!(Action::from_id(id), Some(*action));
        }
    }

    #[test]
    fn from_id_unknown_returns_none() {
        assert_eq!(Action::from_id("nonexistent"), None);
    }

    #[test]
    fn prompt_prefixes() {
        assert_eq!(Action::Search.prompt_prefix(), Some("search "));
        assert_eq!(Action::CommandLine.prompt_prefix(), Some(""));
        assert_eq!(Action::CursorUp.prompt_prefix(), None);
    }
}
