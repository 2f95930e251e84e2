//! Navigation logic for scout.
//!
//! Entries are ordered with [`natural::compare_names`] and [`sort`]; each
//! directory is held as a [`snapshot::DirectorySnapshot`]; cursor and mark
//! state outlives a snapshot in the [`cache::DirectoryCache`]; and
//! [`panes::Navigator`] moves snapshots between the three panes.

pub mod cache;
pub mod natural;
pub mod panes;
pub mod snapshot;
pub mod sort;
