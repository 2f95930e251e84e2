//! File system abstractions for scout.
//!
//! This module provides the core types for representing file entries
//! ([`entry::FileEntry`]), reading directories ([`ops::read_directory`]),
//! computing the lazily shown facts about an entry ([`inspect`]) and
//! resolving owner names ([`owner::OwnerResolver`]).

pub mod entry;
pub mod inspect;
pub mod ops;
pub mod owner;

pub use entry::{EntryDetail, EntryKind};
pub use owner::OwnerResolver;
