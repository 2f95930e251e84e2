//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"gg"`, `"Space"`) to [`Action`]
//! values. The default bindings follow vim conventions.
//!
//! TOML files use string action identifiers (e.g. `"cursor_down"`); these are
//! resolved via [`Action::from_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation, deserialized first, then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Navigation
        bindings.insert("j".to_string(), Action::CursorDown);
        bindings.insert("k".to_string(), Action::CursorUp);
        bindings.insert("h".to_string(), Action::GoParent);
        bindings.insert("l".to_string(), Action::EnterDir);
        bindings.insert("gg".to_string(), Action::CursorTop);
        bindings.insert("G".to_string(), Action::CursorBottom);

        // Marks
        bindings.insert("Space".to_string(), Action::ToggleMark);
        bindings.insert("t".to_string(), Action::ToggleTag);

        // Prompts
        bindings.insert(":".to_string(), Action::CommandLine);
        bindings.insert(";".to_string(), Action::CommandLine);
        bindings.insert("/".to_string(), Action::Search);
        bindings.insert("a".to_string(), Action::Rename);
        bindings.insert("s".to_string(), Action::Shell);

        // Misc
        bindings.insert("r".to_string(), Action::Reload);
        bindings.insert("R".to_string(), Action::Reload);
        bindings.insert("q".to_string(), Action::Quit);
        bindings.insert("Q".to_string(), Action::Quit);

        Self { bindings }
    }
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`, layered over the defaults.
    ///
    /// Unknown action strings are logged and ignored.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::default().merged_with(raw))
    }

    fn merged_with(mut self, raw: RawKeymap) -> Self {
        for (key, action_id) in raw.bindings {
            match Action::from_id(&action_id) {
                Some(action) => {
                    self.bindings.insert(key, action);
                }
                None => tracing::warn!(key = %key, action = %action_id, "unknown action in keymap"),
            }
        }
        self
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }
}
