//! scout core library: UI-agnostic three-pane browsing logic.
//!
//! `scout-core` holds everything that does not touch the terminal: entry
//! classification, natural ordering, directory snapshots with their cursor
//! and viewport, the per-directory state cache, the pane rotation state
//! machine and the fixed-width line layout. The `scout-tui` crate draws it.
//!
//! # Modules
//!
//! - [`fs`]: File system abstractions: [`FileEntry`], directory reading, size labels and details.
//! - [`nav`]: Navigation: natural order, snapshots, the directory cache and the [`Navigator`].
//! - [`layout`]: Fixed-width row layout for pane entries.
//! - [`config`]: User-facing configuration (TOML-based settings, theme, keymaps).
//! - [`action`]: Actions that key bindings resolve to.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod error;
pub mod fs;
pub mod layout;
pub mod nav;

pub use error::{CoreError, CoreResult};
pub use fs::entry::{EntryDetail, EntryKind, FileEntry};
pub use fs::ops::read_directory;
pub use fs::owner::{session_identity, OwnerResolver};
pub use layout::{layout_line, MIN_LAYOUT_WIDTH};
pub use nav::cache::{CacheRecord, DirectoryCache};
pub use nav::natural::compare_names;
pub use nav::panes::{Move, Navigator, PaneSet};
pub use nav::snapshot::{DirectorySnapshot, ScrollPolicy};
pub use nav::sort::{find_by_name, sort_entries};

pub use action::Action;
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which makes accented and
/// Hangul names render as separate combining characters. This helper
/// re-composes them for display.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfc_composes_decomposed_names() {
        let decomposed = "e\u{301}te\u{301}.txt";
        assert_eq!(nfc_string(decomposed), "\u{e9}t\u{e9}.txt");
    }

    #[test]
    fn nfc_leaves_ascii_alone() {
        assert_eq!(nfc_string("plain.rs"), "plain.rs");
    }
}
