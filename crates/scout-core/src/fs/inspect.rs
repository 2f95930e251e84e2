//! Lazily computed entry facts: size labels and bottom-bar details.

use std::fmt::Write as _;
use std::fs::{FileType, Metadata};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::{EntryDetail, FileEntry};
use crate::fs::owner::OwnerResolver;

const UNITS: [char; 9] = ['B', 'K', 'M', 'G', 'T', 'P', 'E', 'Z', 'Y'];

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats a byte count as `"<n> B"` or `"<n.n> <unit>"` in powers of 1024.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut scale = 0;
    while scale < UNITS.len() - 1 && size > 1024.0 {
        size /= 1024.0;
        scale += 1;
    }
    if scale == 0 {
        format!("{size:.0} {}", UNITS[scale])
    } else {
        format!("{size:.1} {}", UNITS[scale])
    }
}

/// Computes the size label of `entry` (inside `dir`) and stores it.
///
/// Regular files get a human-readable size, directories their child count,
/// special files a short literal. Symlinks are prefixed with `"-> "`. When the
/// entry cannot be inspected the label is `"?"` (or `"N/A"` for an unreadable
/// directory) and the entry is marked inaccessible.
pub fn compute_size_label(dir: &Path, entry: &mut FileEntry) {
    let (label, accessible) = size_label_at(&dir.join(entry.os_name()));
    entry.set_size_label(label, accessible);
}

fn size_label_at(path: &Path) -> (String, bool) {
    let link_meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "stat failed");
            return ("?".to_string(), false);
        }
    };

    let mut label = String::new();
    let meta = if link_meta.file_type().is_symlink() {
        label.push_str("-> ");
        std::fs::metadata(path).unwrap_or(link_meta)
    } else {
        link_meta
    };

    let file_type = meta.file_type();
    if file_type.is_file() {
        label.push_str(&format_size(meta.len()));
        return (label, true);
    }
    if file_type.is_dir() {
        return match std::fs::read_dir(path) {
            Ok(children) => {
                label.push_str(&children.count().to_string());
                (label, true)
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot count children");
                label.push_str("N/A");
                (label, false)
            }
        };
    }
    match special_label(&file_type) {
        Some(literal) => {
            label.push_str(literal);
            (label, true)
        }
        None => {
            label.push('?');
            (label, false)
        }
    }
}

#[cfg(unix)]
fn special_label(file_type: &FileType) -> Option<&'static str> {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_block_device() {
        Some("block")
    } else if file_type.is_socket() {
        Some("sock")
    } else if file_type.is_fifo() {
        Some("fifo")
    } else if file_type.is_char_device() {
        Some("dev")
    } else {
        None
    }
}

#[cfg(not(unix))]
fn special_label(_file_type: &FileType) -> Option<&'static str> {
    None
}

/// Computes permissions, owner, modification time and link target for
/// `entry` and stores them on the entry.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] or [`CoreError::PermissionDenied`] when the
/// entry itself cannot be stat'ed. The entry's detail is cleared in that case.
pub fn compute_detail(
    dir: &Path,
    entry: &mut FileEntry,
    owners: &OwnerResolver,
    date_format: &str,
) -> CoreResult<()> {
    let result = detail_at(&dir.join(entry.os_name()), owners, date_format);
    match result {
        Ok(detail) => {
            entry.set_detail(Some(detail));
            Ok(())
        }
        Err(e) => {
            entry.set_detail(None);
            Err(e)
        }
    }
}

fn detail_at(path: &Path, owners: &OwnerResolver, date_format: &str) -> CoreResult<EntryDetail> {
    let link_meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(path, e))?;

    if link_meta.file_type().is_symlink() {
        if let (Ok(target), Ok(meta)) = (std::fs::canonicalize(path), std::fs::metadata(path)) {
            return Ok(EntryDetail {
                permissions: permission_string('l', &meta),
                owner: owner_of(&meta, owners),
                modified: modified_of(&meta, date_format),
                link_target: Some(target),
            });
        }
    }

    Ok(EntryDetail {
        permissions: permission_string(type_glyph(&link_meta.file_type()), &link_meta),
        owner: owner_of(&link_meta, owners),
        modified: modified_of(&link_meta, date_format),
        link_target: None,
    })
}

fn type_glyph(file_type: &FileType) -> char {
    if file_type.is_symlink() {
        return 'l';
    }
    if file_type.is_dir() {
        return 'd';
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;

        if file_type.is_char_device() {
            return 'c';
        }
        if file_type.is_block_device() {
            return 'b';
        }
        if file_type.is_socket() {
            return 's';
        }
        if file_type.is_fifo() {
            return 'f';
        }
    }
    '-'
}

#[cfg(unix)]
fn permission_string(glyph: char, meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(glyph);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn permission_string(glyph: char, meta: &Metadata) -> String {
    let write = if meta.permissions().readonly() { '-' } else { 'w' };
    format!("{glyph}r{write}-r{write}-r{write}-")
}

#[cfg(unix)]
fn owner_of(meta: &Metadata, owners: &OwnerResolver) -> String {
    use std::os::unix::fs::MetadataExt;

    owners.name_for(meta.uid())
}

#[cfg(not(unix))]
fn owner_of(_meta: &Metadata, _owners: &OwnerResolver) -> String {
    "?".to_string()
}

fn modified_of(meta: &Metadata, date_format: &str) -> String {
    meta.modified()
        .map(|time| format_time(time, date_format))
        .unwrap_or_else(|_| "?".to_string())
}

/// Formats `time` in local time. An invalid `date_format` falls back to
/// `%Y-%m-%d %H:%M`.
pub fn format_time(time: SystemTime, date_format: &str) -> String {
    let local: DateTime<Local> = time.into();
    let mut out = String::new();
    if write!(out, "{}", local.format(date_format)).is_ok() {
        return out;
    }
    tracing::warn!(format = %date_format, "invalid date format");
    local.format(FALLBACK_DATE_FORMAT).to_string()
}
