//! Theme configuration for scout.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::EntryKind;

/// Complete theme configuration with per-region color groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub kinds: KindTheme,
    #[serde(default)]
    pub topbar: TopBarTheme,
    #[serde(default)]
    pub bottombar: BottomBarTheme,
    #[serde(default)]
    pub pane: PaneTheme,
}

impl Theme {
    /// Loads a theme from a TOML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Returns the foreground color name for an entry kind.
    pub fn kind_fg(&self, kind: EntryKind) -> &str {
        let k = &self.kinds;
        match kind {
            EntryKind::Default => &k.default,
            EntryKind::Executable => &k.executable,
            EntryKind::Directory => &k.directory,
            EntryKind::Archive => &k.archive,
            EntryKind::Video => &k.video,
            EntryKind::Audio => &k.audio,
            EntryKind::Image => &k.image,
            EntryKind::Socket => &k.socket,
            EntryKind::Fifo => &k.fifo,
            EntryKind::CharDevice => &k.char_device,
            EntryKind::BlockDevice => &k.block_device,
        }
    }
}

/// Entry colors, one per [`EntryKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KindTheme {
    pub default: String,
    pub executable: String,
    pub directory: String,
    pub archive: String,
    pub video: String,
    pub audio: String,
    pub image: String,
    pub socket: String,
    pub fifo: String,
    pub char_device: String,
    pub block_device: String,
}

impl Default for KindTheme {
    fn default() -> Self {
        Self {
            default: "reset".to_string(),
            executable: "green".to_string(),
            directory: "blue".to_string(),
            archive: "red".to_string(),
            video: "magenta".to_string(),
            audio: "cyan".to_string(),
            image: "yellow".to_string(),
            socket: "light_magenta".to_string(),
            fifo: "light_yellow".to_string(),
            char_device: "light_yellow".to_string(),
            block_device: "light_yellow".to_string(),
        }
    }
}

/// Top bar colors: `user@host /path/selected`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopBarTheme {
    pub user_fg: String,
    pub path_fg: String,
    pub file_fg: String,
}

impl Default for TopBarTheme {
    fn default() -> Self {
        Self {
            user_fg: "light_green".to_string(),
            path_fg: "light_blue".to_string(),
            file_fg: "white".to_string(),
        }
    }
}

/// Bottom bar colors: permissions, owner, date and link target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomBarTheme {
    pub permissions_fg: String,
    pub owner_fg: String,
    pub date_fg: String,
    pub link_fg: String,
    pub message_fg: String,
}

impl Default for BottomBarTheme {
    fn default() -> Self {
        Self {
            permissions_fg: "cyan".to_string(),
            owner_fg: "yellow".to_string(),
            date_fg: "magenta".to_string(),
            link_fg: "light_cyan".to_string(),
            message_fg: "white".to_string(),
        }
    }
}

/// Pane-level colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneTheme {
    pub error_fg: String,
    pub marked_fg: String,
    pub border_fg: String,
}

impl Default for PaneTheme {
    fn default() -> Self {
        Self {
            error_fg: "light_red".to_string(),
            marked_fg: "light_yellow".to_string(),
            border_fg: "dark_gray".to_string(),
        }
    }
}

/// Parses a color name (`"blue"`, `"dark_gray"`, `"light_cyan"`) or a
/// `#rrggbb` value. Anything else is `Color::Reset`.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    let name = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        other => parse_hex(other).unwrap_or(Color::Reset),
    }
}

fn parse_hex(value: &str) -> Option<ratatui::style::Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(ratatui::style::Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
