//! In-memory listing of one directory plus its cursor and viewport.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::config::settings::ExtensionConfig;
use crate::fs::entry::FileEntry;
use crate::fs::inspect::{compute_detail, compute_size_label};
use crate::fs::ops::read_directory;
use crate::fs::owner::OwnerResolver;
use crate::nav::sort::{find_by_name, sort_entries};

/// Row thresholds that decide when the viewport scrolls.
///
/// Moving the cursor into the top `upper` rows or past row `lower` of the
/// window scrolls by one, as long as there is something left to reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    rows: usize,
    upper: usize,
    lower: usize,
}

impl ScrollPolicy {
    /// Builds the thresholds for a pane of `rows` visible rows.
    ///
    /// `upper` is `rows / divisor` and `lower` is `rows - upper - 1`.
    pub fn new(rows: usize, divisor: usize) -> Self {
        let rows = rows.max(1);
        let upper = (rows / divisor.max(1)).min(rows - 1);
        Self {
            rows,
            upper,
            lower: rows - upper - 1,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    pub fn lower(&self) -> usize {
        self.lower
    }
}

/// Sorted listing of one directory with cursor and viewport state.
///
/// Invariants: `cursor < entries.len()` when non-empty, and after any
/// viewport recompute `viewport_start <= cursor < viewport_start + rows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    path: PathBuf,
    entries: Vec<FileEntry>,
    cursor: usize,
    viewport_start: usize,
    readable: bool,
}

impl DirectorySnapshot {
    /// Reads and sorts `path`. A directory that cannot be listed yields an
    /// unreadable snapshot instead of an error.
    pub fn load(path: PathBuf, extensions: &ExtensionConfig) -> Self {
        match read_directory(&path, extensions) {
            Ok(entries) => Self::new(path, entries),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot list directory");
                Self::denied(path)
            }
        }
    }

    /// Builds a readable snapshot from unsorted entries.
    pub fn new(path: PathBuf, mut entries: Vec<FileEntry>) -> Self {
        sort_entries(&mut entries);
        Self {
            path,
            entries,
            cursor: 0,
            viewport_start: 0,
            readable: true,
        }
    }

    /// A snapshot for a directory that could not be listed.
    pub fn denied(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
            cursor: 0,
            viewport_start: 0,
            readable: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [FileEntry] {
        &mut self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport_start(&self) -> usize {
        self.viewport_start
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entry under the cursor, if any.
    pub fn selected(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut FileEntry> {
        self.entries.get_mut(self.cursor)
    }

    /// Names of all marked entries.
    pub fn marked_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_marked())
            .map(FileEntry::name)
    }

    /// Moves the cursor up by one. Returns `false` at the first entry.
    pub fn move_up(&mut self, policy: ScrollPolicy) -> bool {
        if self.cursor == 0 {
            return false;
        }
        if self.cursor - self.viewport_start <= policy.upper && self.viewport_start != 0 {
            self.viewport_start -= 1;
        }
        self.cursor -= 1;
        self.clamp_viewport(policy);
        true
    }

    /// Moves the cursor down by one. Returns `false` at the last entry.
    pub fn move_down(&mut self, policy: ScrollPolicy) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        if self.cursor - self.viewport_start >= policy.lower
            && self.entries.len() - self.cursor > policy.upper + 1
        {
            self.viewport_start += 1;
        }
        self.cursor += 1;
        self.clamp_viewport(policy);
        true
    }

    /// Puts the cursor on `index` (clamped) and re-places the viewport.
    /// Returns `false` if the cursor did not move.
    pub fn jump_to(&mut self, index: usize, policy: ScrollPolicy) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let index = index.min(self.entries.len() - 1);
        if index == self.cursor {
            return false;
        }
        self.cursor = index;
        self.place_viewport(policy);
        true
    }

    /// Moves the cursor onto the entry called `name`. Returns `false` if
    /// there is no such entry.
    pub fn select_name(&mut self, name: &str, policy: ScrollPolicy) -> bool {
        match find_by_name(&self.entries, name) {
            Ok(index) => {
                self.cursor = index;
                self.place_viewport(policy);
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.entries.len().saturating_sub(1));
    }

    /// Recomputes `viewport_start` for a freshly loaded or restored cursor.
    ///
    /// A cursor beyond the first screen is kept `upper` rows above the bottom
    /// edge when there are enough entries below it.
    pub fn place_viewport(&mut self, policy: ScrollPolicy) {
        let len = self.entries.len();
        if len == 0 {
            self.cursor = 0;
            self.viewport_start = 0;
            return;
        }
        let rows = policy.rows;
        let cursor = self.cursor.min(len - 1);
        self.cursor = cursor;

        self.viewport_start = if cursor >= rows {
            cursor + 1 - rows + (len - cursor - 1).min(policy.upper)
        } else if cursor > policy.lower && len > rows {
            (cursor - policy.lower).min(len - rows)
        } else {
            0
        };
        self.clamp_viewport(policy);
    }

    fn clamp_viewport(&mut self, policy: ScrollPolicy) {
        if self.viewport_start > self.cursor {
            self.viewport_start = self.cursor;
        }
        if self.cursor >= self.viewport_start + policy.rows {
            self.viewport_start = self.cursor + 1 - policy.rows;
        }
    }

    /// Indices of the entries shown in a window of `rows` rows.
    pub fn visible_range(&self, rows: usize) -> Range<usize> {
        let start = self.viewport_start.min(self.entries.len());
        start..(start + rows).min(self.entries.len())
    }

    /// Computes missing size labels inside `range` and evicts all others.
    pub fn refresh_sizes(&mut self, range: Range<usize>) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if range.contains(&index) {
                if entry.size_label().is_none() {
                    compute_size_label(&self.path, entry);
                }
            } else {
                entry.evict_size();
            }
        }
    }

    /// Computes the size label of the cursor entry if it is missing.
    pub fn ensure_selected_size(&mut self) {
        let path = &self.path;
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            if entry.size_label().is_none() {
                compute_size_label(path, entry);
            }
        }
    }

    /// Computes the detail of the cursor entry and evicts every other detail.
    pub fn refresh_detail(&mut self, owners: &OwnerResolver, date_format: &str) {
        let cursor = self.cursor;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if index != cursor {
                entry.evict_detail();
            } else if entry.detail().is_none() {
                if let Err(e) = compute_detail(&self.path, entry, owners, date_format) {
                    tracing::debug!(name = %entry.name(), error = %e, "no detail for entry");
                }
            }
        }
    }

    /// Drops every lazily computed field.
    pub fn evict_lazy(&mut self) {
        for entry in &mut self.entries {
            entry.evict_size();
            entry.evict_detail();
        }
    }
}
