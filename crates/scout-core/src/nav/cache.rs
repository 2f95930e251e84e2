//! Per-directory cursor and mark memory.
//!
//! When a snapshot leaves the pane set it is retired here; the next fresh
//! snapshot of the same path gets its selection and marks back.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::nav::snapshot::DirectorySnapshot;
use crate::nav::sort::find_by_name;

/// Bucket count used when none is configured.
pub const DEFAULT_BUCKETS: usize = 101;

/// Remembered state of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    path: PathBuf,
    selection: Option<String>,
    marks: HashSet<String>,
}

impl CacheRecord {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn marks(&self) -> &HashSet<String> {
        &self.marks
    }
}

/// Hash-bucketed store of [`CacheRecord`]s keyed by directory path.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    buckets: Vec<Vec<CacheRecord>>,
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

impl DirectoryCache {
    /// Creates an empty cache with `count` buckets (at least one).
    pub fn with_buckets(count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); count.max(1)],
        }
    }

    fn bucket_of(&self, path: &Path) -> usize {
        let hash = path
            .as_os_str()
            .as_encoded_bytes()
            .iter()
            .fold(0u32, |h, &c| u32::from(c).wrapping_add(h.wrapping_mul(31)));
        hash as usize % self.buckets.len()
    }

    /// Returns the record for `path`, if any.
    pub fn record(&self, path: &Path) -> Option<&CacheRecord> {
        self.buckets[self.bucket_of(path)]
            .iter()
            .find(|r| r.path == path)
    }

    /// Restores the remembered cursor and marks onto a fresh snapshot.
    ///
    /// A remembered selection that no longer exists puts the cursor on the
    /// first entry; remembered marks for vanished names are ignored. Returns
    /// whether a record was found.
    pub fn lookup_and_apply(&self, snapshot: &mut DirectorySnapshot) -> bool {
        let Some(record) = self.record(snapshot.path()) else {
            return false;
        };

        let cursor = record
            .selection
            .as_deref()
            .and_then(|name| find_by_name(snapshot.entries(), name).ok())
            .unwrap_or(0);
        snapshot.set_cursor(cursor);

        for entry in snapshot.entries_mut() {
            if record.marks.contains(entry.name()) {
                entry.set_marked(true);
            }
        }

        tracing::debug!(
            path = %record.path.display(),
            cursor,
            marks = record.marks.len(),
            "restored directory state"
        );
        true
    }

    /// Writes the snapshot's selection and marks into the cache.
    ///
    /// A cursor on the first entry is not remembered. When there is nothing
    /// to remember the record is removed. Unreadable snapshots are ignored.
    pub fn retire(&mut self, snapshot: &DirectorySnapshot) {
        if !snapshot.is_readable() {
            return;
        }

        let selection = match snapshot.cursor() {
            0 => None,
            _ => snapshot.selected().map(|e| e.name().to_string()),
        };
        let marks: HashSet<String> = snapshot.marked_names().map(str::to_string).collect();

        let index = self.bucket_of(snapshot.path());
        let bucket = &mut self.buckets[index];
        let existing = bucket.iter().position(|r| r.path == snapshot.path());

        if selection.is_none() && marks.is_empty() {
            if let Some(pos) = existing {
                bucket.swap_remove(pos);
                tracing::debug!(path = %snapshot.path().display(), "dropped directory state");
            }
            return;
        }

        let record = CacheRecord {
            path: snapshot.path().to_path_buf(),
            selection,
            marks,
        };
        match existing {
            Some(pos) => bucket[pos] = record,
            None => bucket.push(record),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::{EntryKind, FileEntry};
    use crate::nav::snapshot::ScrollPolicy;

    const NAMES: [&str; 8] = [
        "a.txt", "b.txt", "c.txt", "d.txt", "e.txt", "f.txt", "g.txt", "h.txt",
    ];

    fn snapshot(path: &str, names: &[&str]) -> DirectorySnapshot {
        let entries = names
            .iter()
            .map(|n| FileEntry::detached(n, EntryKind::Default))
            .collect();
        DirectorySnapshot::new(PathBuf::from(path), entries)
    }

    fn policy() -> ScrollPolicy {
        ScrollPolicy::new(20, 6)
    }

    fn mark(snap: &mut DirectorySnapshot, name: &str) {
        let index = find_by_name(snap.entries(), name).unwrap();
        snap.entries_mut()[index].set_marked(true);
    }

    fn marked(snap: &DirectorySnapshot) -> Vec<&str> {
        snap.marked_names().collect()
    }

    #[test]
    fn round_trip_restores_cursor_and_marks() {
        let mut cache = DirectoryCache::default();
        let mut old = snapshot("/data", &NAMES);
        old.jump_to(5, policy());
        mark(&mut old, "a.txt");
        mark(&mut old, "b.txt");
        cache.retire(&old);

        let mut fresh = snapshot("/data", &NAMES);
        assert!(cache.lookup_and_apply(&mut fresh));
        assert_eq!(fresh.selected().unwrap().name(), "f.txt");
        assert_eq!(marked(&fresh), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn vanished_mark_is_ignored() {
        let mut cache = DirectoryCache::default();
        let mut old = snapshot("/data", &NAMES);
        mark(&mut old, "a.txt");
        mark(&mut old, "b.txt");
        cache.retire(&old);

        let mut fresh = snapshot("/data", &NAMES[1..]);
        assert!(cache.lookup_and_apply(&mut fresh));
        assert_eq!(marked(&fresh), vec!["b.txt"]);
    }

    #[test]
    fn vanished_selection_resets_cursor() {
        let mut cache = DirectoryCache::default();
        let mut old = snapshot("/data", &NAMES);
        old.jump_to(7, policy());
        cache.retire(&old);

        let mut fresh = snapshot("/data", &NAMES[..4]);
        assert!(cache.lookup_and_apply(&mut fresh));
        assert_eq!(fresh.cursor(), 0);
    }

    #[test]
    fn default_state_evicts_record() {
        let mut cache = DirectoryCache::default();
        let mut old = snapshot("/data", &NAMES);
        old.jump_to(3, policy());
        cache.retire(&old);
        assert_eq!(cache.len(), 1);

        let plain = snapshot("/data", &NAMES);
        cache.retire(&plain);
        assert!(cache.is_empty());
        assert!(cache.record(Path::new("/data")).is_none());
    }

    #[test]
    fn default_state_creates_nothing() {
        let mut cache = DirectoryCache::default();
        cache.retire(&snapshot("/data", &NAMES));
        assert!(cache.is_empty());
    }

    #[test]
    fn later_retirement_replaces_marks() {
        let mut cache = DirectoryCache::default();
        let mut first = snapshot("/data", &NAMES);
        mark(&mut first, "a.txt");
        cache.retire(&first);

        let mut second = snapshot("/data", &NAMES);
        mark(&mut second, "c.txt");
        cache.retire(&second);

        let record = cache.record(Path::new("/data")).unwrap();
        assert_eq!(record.marks().len(), 1);
        assert!(record.marks().contains("c.txt"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unreadable_snapshot_keeps_record() {
        let mut cache = DirectoryCache::default();
        let mut old = snapshot("/data", &NAMES);
        old.jump_to(2, policy());
        cache.retire(&old);

        cache.retire(&DirectorySnapshot::denied(PathBuf::from("/data")));
        assert_eq!(cache.record(Path::new("/data")).unwrap().selection(), Some("c.txt"));
    }

    #[test]
    fn lookup_miss_leaves_snapshot_untouched() {
        let cache = DirectoryCache::default();
        let mut fresh = snapshot("/elsewhere", &NAMES);
        let before = fresh.clone();
        assert!(!cache.lookup_and_apply(&mut fresh));
        assert_eq!(fresh, before);
    }

    #[test]
    fn colliding_paths_stay_separate() {
        // One bucket forces every path into the same chain.
        let mut cache = DirectoryCache::with_buckets(1);
        let mut one = snapshot("/one", &NAMES);
        one.jump_to(1, policy());
        let mut two = snapshot("/two", &NAMES);
        two.jump_to(2, policy());
        cache.retire(&one);
        cache.retire(&two);

        assert_eq!(cache.record(Path::new("/one")).unwrap().selection(), Some("b.txt"));
        assert_eq!(cache.record(Path::new("/two")).unwrap().selection(), Some("c.txt"));
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = DirectoryCache::with_buckets(7);
        let mut snap = snapshot("/data", &NAMES);
        mark(&mut snap, "h.txt");
        cache.retire(&snap);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }
}
