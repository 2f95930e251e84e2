//! File entry representation.

use std::ffi::{OsStr, OsString};
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::config::settings::ExtensionConfig;

/// Display class of an entry, used for ordering (directories first) and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Default,
    Executable,
    Directory,
    Archive,
    Video,
    Audio,
    Image,
    Socket,
    Fifo,
    CharDevice,
    BlockDevice,
}

impl EntryKind {
    /// Classifies `meta` (already resolved through a symlink if possible).
    ///
    /// Special files map directly; a regular file executable by user, group
    /// and other is [`EntryKind::Executable`]; otherwise the lower-cased
    /// extension of `name` is looked up in `extensions`.
    pub fn from_metadata(meta: &Metadata, name: &str, extensions: &ExtensionConfig) -> Self {
        let file_type = meta.file_type();
        if file_type.is_dir() {
            return Self::Directory;
        }
        if let Some(kind) = special_kind(&file_type) {
            return kind;
        }
        if !file_type.is_file() {
            return Self::Default;
        }
        if is_executable_by_all(meta) {
            return Self::Executable;
        }
        Self::from_extension(name, extensions)
    }

    /// Extension-only classification for regular files.
    pub fn from_extension(name: &str, extensions: &ExtensionConfig) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => extensions
                .kind_for(&ext.to_lowercase())
                .unwrap_or(Self::Default),
            _ => Self::Default,
        }
    }

    /// Special files and directories are rendered bold.
    pub fn is_emphasized(self) -> bool {
        !matches!(
            self,
            Self::Default | Self::Archive | Self::Video | Self::Audio | Self::Image
        )
    }
}

#[cfg(unix)]
fn special_kind(file_type: &std::fs::FileType) -> Option<EntryKind> {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_socket() {
        Some(EntryKind::Socket)
    } else if file_type.is_fifo() {
        Some(EntryKind::Fifo)
    } else if file_type.is_char_device() {
        Some(EntryKind::CharDevice)
    } else if file_type.is_block_device() {
        Some(EntryKind::BlockDevice)
    } else {
        None
    }
}

#[cfg(not(unix))]
fn special_kind(_file_type: &std::fs::FileType) -> Option<EntryKind> {
    None
}

#[cfg(unix)]
fn is_executable_by_all(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    meta.permissions().mode() & 0o111 == 0o111
}

#[cfg(not(unix))]
fn is_executable_by_all(_meta: &Metadata) -> bool {
    false
}

/// Facts about the cursor entry shown in the bottom bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    /// Type glyph followed by nine `rwx` characters, e.g. `drwxr-xr-x`.
    pub permissions: String,
    pub owner: String,
    pub modified: String,
    /// Resolved absolute target for symlinks; `None` for broken links and
    /// for entries that are not links.
    pub link_target: Option<PathBuf>,
}

/// A single directory entry inside a snapshot.
///
/// `kind` and `is_symlink` are fixed at creation. `size_label` and `detail`
/// are filled lazily and evicted when the entry is no longer displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    os_name: OsString,
    kind: EntryKind,
    accessible: bool,
    is_symlink: bool,
    marked: bool,
    tagged: bool,
    size_label: Option<String>,
    detail: Option<EntryDetail>,
}

impl FileEntry {
    /// Classifies the entry `name` inside `dir`.
    ///
    /// Symlinks take their kind from the target when it resolves. A broken
    /// symlink is still returned (with `is_symlink` set and kind
    /// [`EntryKind::Default`]) so that it can be displayed as such.
    ///
    /// # Errors
    ///
    /// Returns the `lstat` error if the entry itself cannot be inspected.
    pub fn classify(dir: &Path, name: &OsStr, extensions: &ExtensionConfig) -> std::io::Result<Self> {
        let path = dir.join(name);
        let link_meta = std::fs::symlink_metadata(&path)?;
        let is_symlink = link_meta.file_type().is_symlink();
        let meta = if is_symlink {
            std::fs::metadata(&path).unwrap_or(link_meta)
        } else {
            link_meta
        };

        let display = name.to_string_lossy().into_owned();
        let kind = EntryKind::from_metadata(&meta, &display, extensions);

        Ok(Self {
            name: display,
            os_name: name.to_os_string(),
            kind,
            accessible: true,
            is_symlink,
            marked: false,
            tagged: false,
            size_label: None,
            detail: None,
        })
    }

    /// An entry that showed up in the listing but could not be inspected.
    pub fn unreadable(name: &OsStr) -> Self {
        Self {
            size_label: Some("?".to_string()),
            accessible: false,
            ..Self::detached(&name.to_string_lossy(), EntryKind::Default)
        }
    }

    /// Builds an entry without touching the filesystem.
    pub fn detached(name: &str, kind: EntryKind) -> Self {
        Self {
            name: name.to_string(),
            os_name: OsString::from(name),
            kind,
            accessible: true,
            is_symlink: false,
            marked: false,
            tagged: false,
            size_label: None,
            detail: None,
        }
    }

    /// Returns the entry name (lossily decoded for display and ordering).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw name, suitable for joining onto the parent path.
    pub fn os_name(&self) -> &OsStr {
        &self.os_name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns `true` if this entry is (or links to) a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn is_tagged(&self) -> bool {
        self.tagged
    }

    pub fn size_label(&self) -> Option<&str> {
        self.size_label.as_deref()
    }

    pub fn detail(&self) -> Option<&EntryDetail> {
        self.detail.as_ref()
    }

    pub fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    pub fn toggle_marked(&mut self) {
        self.marked = !self.marked;
    }

    pub fn toggle_tagged(&mut self) {
        self.tagged = !self.tagged;
    }

    pub(crate) fn set_size_label(&mut self, label: String, accessible: bool) {
        self.size_label = Some(label);
        if !accessible {
            self.accessible = false;
        }
    }

    pub(crate) fn set_detail(&mut self, detail: Option<EntryDetail>) {
        self.detail = detail;
    }

    /// Drops the size label; it is recomputed when the entry is shown again.
    pub fn evict_size(&mut self) {
        self.size_label = None;
    }

    pub fn evict_detail(&mut self) {
        self.detail = None;
    }

    #[cfg(test)]
    pub(crate) fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }
}
