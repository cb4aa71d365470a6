//! Filesystem change description and the read-only delta accessor

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Requested build kind. A full build runs every applicable participant
/// regardless of the delta; an incremental build lets participants skip
/// work when nothing they care about changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildKind {
    Full,
    Incremental,
}

/// Kind of change recorded for a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

/// Structured description of filesystem changes since the last build,
/// keyed by project-relative path. Created per build invocation by the
/// caller and consumed once.
///
/// At the engine surface a change set is `Option<ChangeSet>`: `None`
/// means "assume everything changed" (a full/clean build).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    entries: BTreeMap<PathBuf, ChangeKind>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, kind: ChangeKind) {
        self.entries.insert(path.into(), kind);
    }

    pub fn with(mut self, path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        self.record(path, kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn kind_of(&self, path: &Path) -> Option<ChangeKind> {
        self.entries.get(path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, ChangeKind)> {
        self.entries.iter().map(|(p, k)| (p.as_path(), *k))
    }
}

/// Read-only accessor over the current build's change set, handed to
/// participants. Wraps the absent case: when no change set was supplied,
/// the delta reports changes everywhere.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDelta<'a> {
    change_set: Option<&'a ChangeSet>,
}

impl<'a> ResourceDelta<'a> {
    pub fn new(change_set: Option<&'a ChangeSet>) -> Self {
        Self { change_set }
    }

    /// True when there is anything to build against: either the change
    /// set is absent (everything changed) or it is non-empty.
    pub fn has_changes(&self) -> bool {
        match self.change_set {
            None => true,
            Some(cs) => !cs.is_empty(),
        }
    }

    /// True when a concrete (present) change set was supplied.
    pub fn is_incremental(&self) -> bool {
        self.change_set.is_some()
    }

    pub fn kind_of(&self, path: &Path) -> Option<ChangeKind> {
        self.change_set.and_then(|cs| cs.kind_of(path))
    }

    /// Changed paths under `prefix`, in path order. Empty for an absent
    /// change set: callers should treat `!is_incremental()` as "rebuild
    /// everything" rather than enumerating.
    pub fn changes_under(&self, prefix: &Path) -> Vec<(&'a Path, ChangeKind)> {
        match self.change_set {
            None => Vec::new(),
            Some(cs) => cs.iter().filter(|(p, _)| p.starts_with(prefix)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Path, ChangeKind)> {
        self.change_set.into_iter().flat_map(|cs| cs.iter())
    }
}
