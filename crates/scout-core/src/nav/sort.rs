//! Snapshot ordering and name lookup.

use std::cmp::Ordering;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::nav::natural::compare_names;

/// Directories first, then natural name order.
pub fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| compare_names(a.name(), b.name()))
}

/// Sorts `entries` in place: directories first, then [`compare_names`].
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

/// Finds the index of the entry called `name` in a sorted slice.
///
/// The kind of the named entry is not known in advance, so the directory
/// partition is binary searched first, then the non-directory partition, and
/// a linear scan covers slices that are not perfectly sorted.
///
/// # Errors
///
/// Returns [`CoreError::NoSuchEntry`] if no entry has that name.
pub fn find_by_name(entries: &[FileEntry], name: &str) -> CoreResult<usize> {
    let split = entries.partition_point(FileEntry::is_dir);
    let (dirs, others) = entries.split_at(split);

    if let Ok(index) = dirs.binary_search_by(|e| compare_names(e.name(), name)) {
        return Ok(index);
    }
    if let Ok(index) = others.binary_search_by(|e| compare_names(e.name(), name)) {
        return Ok(split + index);
    }
    entries
        .iter()
        .position(|e| e.name() == name)
        .ok_or_else(|| CoreError::NoSuchEntry(name.to_string()))
}

/// Returns the index of the best fuzzy match for `query`, if any.
///
/// Ties keep the earliest entry so repeated searches are stable.
pub fn best_match(entries: &[FileEntry], query: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let matcher = SkimMatcherV2::default();
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, e)| matcher.fuzzy_match(e.name(), query).map(|score| (i, score)))
        .fold(None, |best: Option<(usize, i64)>, (i, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}
