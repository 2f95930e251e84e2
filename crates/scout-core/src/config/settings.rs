//! Application configuration loaded from a TOML file.
//!
//! Every section has defaults, so scout runs without a config file. The
//! configuration is read once at startup and never mutated afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::EntryKind;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub extensions: ExtensionConfig,
    #[serde(default)]
    pub messages: MessageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Process-level behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Keep the process working directory equal to the Current pane's path.
    #[serde(default = "default_true")]
    pub sync_cwd: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { sync_cwd: true }
    }
}

/// Extension lists used to classify regular files.
///
/// Lists are checked in the order video, audio, image, archive; the first
/// list containing the extension wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    #[serde(default = "default_video")]
    pub video: Vec<String>,
    #[serde(default = "default_audio")]
    pub audio: Vec<String>,
    #[serde(default = "default_image")]
    pub image: Vec<String>,
    #[serde(default = "default_archive")]
    pub archive: Vec<String>,
}

impl ExtensionConfig {
    /// Returns the kind for a lower-cased extension (without the dot).
    pub fn kind_for(&self, ext: &str) -> Option<EntryKind> {
        let lists = [
            (&self.video, EntryKind::Video),
            (&self.audio, EntryKind::Audio),
            (&self.image, EntryKind::Image),
            (&self.archive, EntryKind::Archive),
        ];
        lists
            .into_iter()
            .find(|(list, _)| list.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(|(_, kind)| kind)
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            video: default_video(),
            audio: default_audio(),
            image: default_image(),
            archive: default_archive(),
        }
    }
}

/// Literal strings shown in place of pane contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_empty_dir")]
    pub empty_dir: String,
    #[serde(default = "default_access_denied")]
    pub access_denied: String,
    #[serde(default = "default_broken_symlink")]
    pub broken_symlink: String,
    #[serde(default = "default_too_small")]
    pub too_small: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            empty_dir: default_empty_dir(),
            access_denied: default_access_denied(),
            broken_symlink: default_broken_symlink(),
            too_small: default_too_small(),
        }
    }
}

/// Layout and display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Below this many columns the panes are not laid out.
    #[serde(default = "default_min_cols")]
    pub min_cols: u16,
    /// Below this many lines the panes are not laid out.
    #[serde(default = "default_min_lines")]
    pub min_lines: u16,
    /// The scroll band is `rows / scroll_divisor` rows from either edge.
    #[serde(default = "default_scroll_divisor")]
    pub scroll_divisor: usize,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            min_cols: default_min_cols(),
            min_lines: default_min_lines(),
            scroll_divisor: default_scroll_divisor(),
            date_format: default_date_format(),
        }
    }
}

/// Directory cache tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_buckets")]
    pub buckets: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_video() -> Vec<String> {
    strings(&["mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "m4v", "mpg", "mpeg"])
}

fn default_audio() -> Vec<String> {
    strings(&["mp3", "flac", "ogg", "wav", "m4a", "aac", "opus", "wma"])
}

fn default_image() -> Vec<String> {
    strings(&["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "tiff", "ico"])
}

fn default_archive() -> Vec<String> {
    strings(&[
        "tar", "gz", "tgz", "bz2", "xz", "zst", "zip", "7z", "rar", "deb", "rpm", "iso",
    ])
}

fn default_empty_dir() -> String {
    "empty".to_string()
}

fn default_access_denied() -> String {
    "access denied".to_string()
}

fn default_broken_symlink() -> String {
    "broken symlink".to_string()
}

fn default_too_small() -> String {
    "terminal too small".to_string()
}

fn default_min_cols() -> u16 {
    40
}

fn default_min_lines() -> u16 {
    5
}

fn default_scroll_divisor() -> usize {
    6
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_buckets() -> usize {
    101
}
