//! Directory reading operations.

use std::path::Path;

use crate::config::settings::ExtensionConfig;
use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// Reads the immediate contents of a directory and returns them as [`FileEntry`] values.
///
/// `.` and `..` are never included. The returned entries are **unsorted**; use
/// [`crate::nav::sort::sort_entries`] to order them. An entry that cannot be
/// inspected is kept with sentinel values (see [`FileEntry::unreadable`]).
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use scout_core::config::settings::ExtensionConfig;
/// use scout_core::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/home/user"), &ExtensionConfig::default()).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path, extensions: &ExtensionConfig) -> CoreResult<Vec<FileEntry>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(path, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let name = dir_entry.file_name();
        let entry = match FileEntry::classify(path, &name, extensions) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    dir = %path.display(),
                    name = %name.to_string_lossy(),
                    error = %e,
                    "cannot inspect entry"
                );
                FileEntry::unreadable(&name)
            }
        };
        entries.push(entry);
    }

    tracing::debug!(dir = %path.display(), count = entries.len(), "read directory");
    Ok(entries)
}
