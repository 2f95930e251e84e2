//! The three-pane navigation state machine.
//!
//! [`PaneSet`] holds the Parent, Current and Next snapshots. [`Navigator`]
//! applies [`Move`]s to it, moving snapshots between slots instead of
//! copying them. A snapshot that leaves the set always goes through
//! [`Navigator::retire_and_drop`] so its state reaches the cache first.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::settings::{Config, ExtensionConfig};
use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::fs::owner::OwnerResolver;
use crate::nav::cache::DirectoryCache;
use crate::nav::snapshot::{DirectorySnapshot, ScrollPolicy};
use crate::nav::sort::best_match;

/// A cursor or directory move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Top,
    Bottom,
    /// Go to the parent directory.
    Left,
    /// Enter the directory under the cursor.
    Right,
}

/// Parent, Current and Next snapshots.
#[derive(Debug)]
pub struct PaneSet {
    parent: Option<DirectorySnapshot>,
    current: DirectorySnapshot,
    next: Option<DirectorySnapshot>,
}

impl PaneSet {
    /// `None` when Current is the filesystem root.
    pub fn parent(&self) -> Option<&DirectorySnapshot> {
        self.parent.as_ref()
    }

    pub fn current(&self) -> &DirectorySnapshot {
        &self.current
    }

    /// `None` unless the cursor entry is an accessible directory.
    pub fn next(&self) -> Option<&DirectorySnapshot> {
        self.next.as_ref()
    }
}

/// Owns the pane set and the directory cache and applies moves to them.
#[derive(Debug)]
pub struct Navigator {
    panes: PaneSet,
    cache: DirectoryCache,
    extensions: ExtensionConfig,
    scroll_divisor: usize,
    policy: ScrollPolicy,
    sync_cwd: bool,
    owners: OwnerResolver,
    date_format: String,
}

impl Navigator {
    /// Opens `path` as the Current pane and loads Parent and Next around it.
    ///
    /// `rows` is the number of entry rows each pane can display.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] if the path
    ///   cannot be resolved.
    /// - [`CoreError::NotADirectory`] if it is not a directory.
    pub fn open(path: &Path, config: &Config, owners: OwnerResolver, rows: usize) -> CoreResult<Self> {
        let canonical = std::fs::canonicalize(path).map_err(|e| CoreError::from_io(path, e))?;
        if !canonical.is_dir() {
            return Err(CoreError::NotADirectory(canonical));
        }

        let mut navigator = Self {
            panes: PaneSet {
                parent: None,
                current: DirectorySnapshot::denied(canonical.clone()),
                next: None,
            },
            cache: DirectoryCache::with_buckets(config.cache.buckets),
            extensions: config.extensions.clone(),
            scroll_divisor: config.ui.scroll_divisor,
            policy: ScrollPolicy::new(rows, config.ui.scroll_divisor),
            sync_cwd: config.general.sync_cwd,
            owners,
            date_format: config.ui.date_format.clone(),
        };
        navigator.populate(canonical);
        tracing::info!(path = %navigator.panes.current.path().display(), "opened");
        Ok(navigator)
    }

    pub fn panes(&self) -> &PaneSet {
        &self.panes
    }

    pub fn current(&self) -> &DirectorySnapshot {
        &self.panes.current
    }

    /// Returns the entry under the cursor in the Current pane.
    pub fn selected(&self) -> Option<&FileEntry> {
        self.panes.current.selected()
    }

    pub fn cache(&self) -> &DirectoryCache {
        &self.cache
    }

    pub fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    /// Applies `mv`. Returns `false` when the move was a no-op.
    pub fn apply(&mut self, mv: Move) -> bool {
        let policy = self.policy;
        let changed = match mv {
            Move::Up => self.panes.current.move_up(policy),
            Move::Down => self.panes.current.move_down(policy),
            Move::Top => self.panes.current.jump_to(0, policy),
            Move::Bottom => {
                let last = self.panes.current.len().saturating_sub(1);
                self.panes.current.jump_to(last, policy)
            }
            Move::Left => return self.go_left(),
            Move::Right => return self.go_right(),
        };
        if changed {
            tracing::debug!(?mv, cursor = self.panes.current.cursor(), "cursor moved");
            self.cursor_changed();
        }
        changed
    }

    fn go_left(&mut self) -> bool {
        let Some(grandparent) = self.panes.current.path().parent().map(Path::to_path_buf) else {
            return false;
        };

        let new_current = match self.panes.parent.take() {
            Some(parent) => parent,
            None => self.load_fresh(grandparent),
        };
        if let Some(next) = self.panes.next.take() {
            self.retire_and_drop(next);
        }
        let mut old_current = std::mem::replace(&mut self.panes.current, new_current);
        old_current.evict_lazy();

        let left_name = file_name_of(old_current.path());
        let still_selected = self
            .panes
            .current
            .selected()
            .is_some_and(|e| left_name.as_deref() == Some(e.name()));
        self.panes.parent = self.load_parent_of(self.panes.current.path());
        self.sync_cwd();
        self.refresh_current_view();

        if still_selected {
            self.panes.next = Some(old_current);
        } else {
            self.retire_and_drop(old_current);
            self.rebuild_next();
        }
        tracing::debug!(path = %self.panes.current.path().display(), "moved left");
        true
    }

    fn go_right(&mut self) -> bool {
        self.panes.current.ensure_selected_size();
        let enterable = self
            .panes
            .current
            .selected()
            .is_some_and(|e| e.is_dir() && e.is_accessible());
        if !enterable {
            return false;
        }

        let new_current = match self.panes.next.take() {
            Some(next) => next,
            None => match self.next_path() {
                Some(path) => self.load_fresh(path),
                None => return false,
            },
        };
        if !new_current.is_readable() {
            self.panes.next = Some(new_current);
            return false;
        }

        if let Some(parent) = self.panes.parent.take() {
            self.retire_and_drop(parent);
        }
        let mut old_current = std::mem::replace(&mut self.panes.current, new_current);
        old_current.evict_lazy();
        self.panes.parent = Some(old_current);

        self.sync_cwd();
        self.refresh_current_view();
        self.rebuild_next();
        tracing::debug!(path = %self.panes.current.path().display(), "moved right");
        true
    }

    /// Toggles the mark on the cursor entry.
    pub fn toggle_mark(&mut self) -> bool {
        match self.panes.current.selected_mut() {
            Some(entry) => {
                entry.toggle_marked();
                true
            }
            None => false,
        }
    }

    /// Toggles the tag on the cursor entry.
    pub fn toggle_tag(&mut self) -> bool {
        match self.panes.current.selected_mut() {
            Some(entry) => {
                entry.toggle_tagged();
                true
            }
            None => false,
        }
    }

    /// Recomputes thresholds and viewports for a new pane height.
    pub fn resize(&mut self, rows: usize) {
        self.policy = ScrollPolicy::new(rows, self.scroll_divisor);
        let policy = self.policy;
        self.panes.current.place_viewport(policy);
        if let Some(parent) = self.panes.parent.as_mut() {
            parent.place_viewport(policy);
        }
        if let Some(next) = self.panes.next.as_mut() {
            next.place_viewport(policy);
        }
        self.refresh_current_view();
        tracing::debug!(rows, "resized");
    }

    /// Re-reads all panes from disk, keeping cursors and marks.
    pub fn reload(&mut self) {
        let path = self.panes.current.path().to_path_buf();
        self.retire_all();
        self.populate(path);
        tracing::debug!("reloaded");
    }

    /// Moves the cursor onto `name`. Returns `false` if it is not present.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let before = self.panes.current.cursor();
        if !self.panes.current.select_name(name, self.policy) {
            return false;
        }
        if self.panes.current.cursor() != before {
            self.cursor_changed();
        }
        true
    }

    /// Moves the cursor onto the best fuzzy match for `query`.
    pub fn jump_to_match(&mut self, query: &str) -> bool {
        let Some(index) = best_match(self.panes.current.entries(), query) else {
            return false;
        };
        if self.panes.current.jump_to(index, self.policy) {
            self.cursor_changed();
        }
        true
    }

    /// Retires every pane and clears the cache.
    pub fn shutdown(&mut self) {
        self.cache.retire(&self.panes.current);
        if let Some(parent) = self.panes.parent.take() {
            self.retire_and_drop(parent);
        }
        if let Some(next) = self.panes.next.take() {
            self.retire_and_drop(next);
        }
        tracing::debug!(records = self.cache.len(), "clearing directory cache");
        self.cache.clear();
    }

    /// The only way a snapshot is discarded: its state is written to the
    /// cache, then it is dropped.
    fn retire_and_drop(&mut self, snapshot: DirectorySnapshot) {
        self.cache.retire(&snapshot);
        drop(snapshot);
    }

    fn retire_all(&mut self) {
        if let Some(parent) = self.panes.parent.take() {
            self.retire_and_drop(parent);
        }
        if let Some(next) = self.panes.next.take() {
            self.retire_and_drop(next);
        }
        let placeholder = DirectorySnapshot::denied(self.panes.current.path().to_path_buf());
        let current = std::mem::replace(&mut self.panes.current, placeholder);
        self.retire_and_drop(current);
    }

    /// Loads Current at `path` and builds Parent and Next around it.
    fn populate(&mut self, path: PathBuf) {
        self.panes.current = self.load_fresh(path);
        self.panes.parent = self.load_parent_of(self.panes.current.path());
        self.sync_cwd();
        self.refresh_current_view();
        self.rebuild_next();
    }

    fn load_fresh(&self, path: PathBuf) -> DirectorySnapshot {
        let mut snapshot = DirectorySnapshot::load(path, &self.extensions);
        self.cache.lookup_and_apply(&mut snapshot);
        snapshot.place_viewport(self.policy);
        snapshot
    }

    /// Loads the parent of `child` with its cursor on `child`.
    fn load_parent_of(&self, child: &Path) -> Option<DirectorySnapshot> {
        let parent_path = child.parent()?.to_path_buf();
        let mut parent = self.load_fresh(parent_path);
        if let Some(name) = file_name_of(child) {
            parent.select_name(&name, self.policy);
        }
        Some(parent)
    }

    fn next_path(&self) -> Option<PathBuf> {
        let current = &self.panes.current;
        current
            .selected()
            .filter(|e| e.is_dir() && e.is_accessible())
            .map(|e| current.path().join(e.os_name()))
    }

    /// Next previews the cursor directory. A directory that cannot be
    /// opened gets a denied snapshot so the pane shows access denied.
    fn rebuild_next(&mut self) {
        if let Some(next) = self.panes.next.take() {
            self.retire_and_drop(next);
        }
        let current = &self.panes.current;
        let next = match current.selected() {
            Some(entry) if entry.is_dir() => {
                let path = current.path().join(entry.os_name());
                if entry.is_accessible() {
                    self.load_fresh(path)
                } else {
                    DirectorySnapshot::denied(path)
                }
            }
            _ => return,
        };
        self.panes.next = Some(next);
    }

    fn cursor_changed(&mut self) {
        self.refresh_current_view();
        self.rebuild_next();
    }

    fn refresh_current_view(&mut self) {
        let range = self.panes.current.visible_range(self.policy.rows());
        self.panes.current.refresh_sizes(range);
        self.panes
            .current
            .refresh_detail(&self.owners, &self.date_format);
    }

    fn sync_cwd(&self) {
        if !self.sync_cwd {
            return;
        }
        let path = self.panes.current.path();
        if let Err(e) = std::env::set_current_dir(path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot change working directory");
        }
    }
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(OsStr::to_string_lossy)
        .map(|name| name.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::EntryKind;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> Config {
        let mut config = Config::default();
        config.general.sync_cwd = false;
        config
    }

    fn open(path: &Path) -> Navigator {
        Navigator::open(path, &config(), OwnerResolver::default(), 10).unwrap()
    }

    fn names(snap: &DirectorySnapshot) -> Vec<&str> {
        snap.entries().iter().map(FileEntry::name).collect()
    }

    /// root/{alpha/{inner/, one.txt}, beta/, file.txt}
    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("alpha/inner")).unwrap();
        fs::write(root.join("alpha/one.txt"), "1").unwrap();
        fs::create_dir(root.join("beta")).unwrap();
        fs::write(root.join("file.txt"), "hello").unwrap();
        tmp
    }

    #[test]
    fn open_builds_three_panes() {
        let tmp = fixture();
        let nav = open(tmp.path());
        let root = fs::canonicalize(tmp.path()).unwrap();

        assert_eq!(nav.current().path(), root);
        assert_eq!(names(nav.current()), vec!["alpha", "beta", "file.txt"]);

        let parent = nav.panes().parent().unwrap();
        assert_eq!(parent.path(), root.parent().unwrap());
        let expected = root.file_name().unwrap().to_string_lossy();
        assert_eq!(parent.selected().unwrap().name(), expected);

        let next = nav.panes().next().unwrap();
        assert_eq!(next.path(), root.join("alpha"));
        assert_eq!(names(next), vec!["inner", "one.txt"]);
    }

    #[test]
    fn open_rejects_files_and_missing_paths() {
        let tmp = fixture();
        let file = Navigator::open(
            &tmp.path().join("file.txt"),
            &config(),
            OwnerResolver::default(),
            10,
        );
        assert!(matches!(file, Err(CoreError::NotADirectory(_))));

        let missing =
            Navigator::open(&tmp.path().join("nope"), &config(), OwnerResolver::default(), 10);
        assert!(matches!(missing, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn next_follows_cursor() {
        let tmp = fixture();
        let mut nav = open(tmp.path());

        assert!(nav.apply(Move::Down));
        assert_eq!(nav.panes().next().unwrap().path().file_name().unwrap(), "beta");

        assert!(nav.apply(Move::Down));
        assert!(nav.panes().next().is_none());
    }

    #[test]
    fn boundary_moves_are_noops() {
        let tmp = fixture();
        let mut nav = open(tmp.path());

        assert!(!nav.apply(Move::Up));
        assert!(!nav.apply(Move::Top));
        assert!(nav.apply(Move::Bottom));
        assert!(!nav.apply(Move::Down));
        assert!(!nav.apply(Move::Bottom));
        assert_eq!(nav.current().cursor(), 2);

        // file.txt is not a directory
        assert!(!nav.apply(Move::Right));
        assert_eq!(nav.current().path(), fs::canonicalize(tmp.path()).unwrap());
    }

    #[test]
    fn right_rotates_panes() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        let root = fs::canonicalize(tmp.path()).unwrap();

        assert!(nav.apply(Move::Right));
        assert_eq!(nav.current().path(), root.join("alpha"));
        assert_eq!(nav.panes().parent().unwrap().path(), root);
        assert_eq!(nav.panes().next().unwrap().path(), root.join("alpha/inner"));
    }

    #[test]
    fn left_restores_selection_in_parent() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        let root = fs::canonicalize(tmp.path()).unwrap();

        nav.apply(Move::Down);
        assert!(nav.apply(Move::Right));
        assert_eq!(nav.current().path(), root.join("beta"));

        assert!(nav.apply(Move::Left));
        assert_eq!(nav.current().path(), root);
        assert_eq!(nav.selected().unwrap().name(), "beta");
        assert_eq!(nav.panes().next().unwrap().path(), root.join("beta"));
    }

    #[test]
    fn left_at_root_is_noop() {
        let mut nav = open(Path::new("/"));
        assert!(nav.panes().parent().is_none());
        assert!(!nav.apply(Move::Left));
        assert_eq!(nav.current().path(), Path::new("/"));
    }

    #[test]
    fn marks_survive_leaving_and_returning() {
        let tmp = fixture();
        let mut nav = open(&tmp.path().join("alpha"));
        nav.apply(Move::Down);
        assert!(nav.toggle_mark());

        assert!(nav.apply(Move::Left));
        assert!(nav.apply(Move::Down));
        assert!(nav.apply(Move::Up));
        assert!(nav.apply(Move::Right));
        let marked: Vec<&str> = nav.current().marked_names().collect();
        assert_eq!(marked, vec!["one.txt"]);
    }

    #[test]
    fn reload_picks_up_new_entries_and_keeps_cursor() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        nav.apply(Move::Down);
        nav.toggle_mark();

        fs::write(tmp.path().join("added.txt"), "").unwrap();
        nav.reload();

        assert_eq!(names(nav.current()), vec!["alpha", "beta", "added.txt", "file.txt"]);
        assert_eq!(nav.selected().unwrap().name(), "beta");
        assert!(nav.selected().unwrap().is_marked());
    }

    #[test]
    fn sizes_follow_visible_window() {
        let tmp = TempDir::new().unwrap();
        for i in 0..20 {
            fs::write(tmp.path().join(format!("f{i:02}")), "x").unwrap();
        }
        let mut nav = Navigator::open(tmp.path(), &config(), OwnerResolver::default(), 5).unwrap();

        let sized = |nav: &Navigator| {
            nav.current()
                .entries()
                .iter()
                .filter(|e| e.size_label().is_some())
                .count()
        };
        assert_eq!(sized(&nav), 5);
        nav.apply(Move::Bottom);
        assert_eq!(sized(&nav), 5);
        assert!(nav.current().entries()[19].size_label().is_some());
        assert!(nav.current().entries()[0].size_label().is_none());
    }

    #[test]
    fn detail_tracks_cursor() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        assert!(nav.selected().unwrap().detail().is_some());

        nav.apply(Move::Down);
        assert!(nav.current().entries()[0].detail().is_none());
        assert!(nav.selected().unwrap().detail().is_some());
    }

    #[test]
    fn resize_keeps_cursor_visible() {
        let tmp = TempDir::new().unwrap();
        for i in 0..40 {
            fs::write(tmp.path().join(format!("f{i:02}")), "").unwrap();
        }
        let mut nav = Navigator::open(tmp.path(), &config(), OwnerResolver::default(), 30).unwrap();
        nav.select_by_name("f25");

        nav.resize(8);
        let current = nav.current();
        assert!(current.viewport_start() <= current.cursor());
        assert!(current.cursor() < current.viewport_start() + 8);
        assert_eq!(nav.policy().rows(), 8);
    }

    #[test]
    fn search_jumps_to_best_match() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        assert!(nav.jump_to_match("file"));
        assert_eq!(nav.selected().unwrap().name(), "file.txt");
        assert!(!nav.jump_to_match("zzzz"));
    }

    #[test]
    fn tag_toggles_on_cursor() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        assert!(nav.toggle_tag());
        assert!(nav.selected().unwrap().is_tagged());
    }

    #[test]
    fn shutdown_clears_cache() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        nav.apply(Move::Right);
        nav.apply(Move::Down);
        nav.apply(Move::Left);
        nav.apply(Move::Down);
        assert!(!nav.cache().is_empty());

        nav.shutdown();
        assert!(nav.cache().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_not_entered() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = fixture();
        let locked = tmp.path().join("alpha");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // running as root
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut nav = open(tmp.path());
        assert!(!nav.selected().unwrap().is_accessible());
        assert!(!nav.panes().next().unwrap().is_readable());
        assert!(!nav.apply(Move::Right));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn inaccessible_directory_previews_as_denied_and_is_not_entered() {
        let tmp = fixture();
        let mut nav = open(tmp.path());
        let root = nav.current().path().to_path_buf();
        nav.panes.current = DirectorySnapshot::new(
            root.clone(),
            vec![
                FileEntry::detached("locked", EntryKind::Directory).with_accessible(false),
                FileEntry::detached("notes.txt", EntryKind::Default),
            ],
        );
        nav.rebuild_next();

        let next = nav.panes().next().unwrap();
        assert!(!next.is_readable());
        assert_eq!(next.path(), root.join("locked"));

        assert!(!nav.apply(Move::Right));
        assert_eq!(nav.current().path(), root);
        assert_eq!(nav.selected().unwrap().name(), "locked");
        assert!(!nav.panes().next().unwrap().is_readable());

        nav.apply(Move::Down);
        assert!(nav.panes().next().is_none());
        nav.apply(Move::Up);
        assert!(!nav.panes().next().unwrap().is_readable());
    }
}
