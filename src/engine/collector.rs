//! Per-build result accumulation sink
//!
//! Participants write diagnostics and touched-file records through a
//! [`BoundCollector`] scoped to their participant key; the scheduler and
//! reconciler read the accumulated state back out afterwards. Binding is
//! scoped by borrow, so a write without an owning key cannot be expressed.

use crate::model::{CollectedMessage, ParticipantKey, Severity, SourceLocation};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A failure recorded during the build, attributed to the participant key
/// it occurred under, or to no key for failures of the scheduling
/// machinery itself.
#[derive(Debug)]
pub struct RecordedFailure {
    pub key: Option<ParticipantKey>,
    pub error: anyhow::Error,
}

/// Accumulation sink for one build invocation. Created fresh per build
/// and drained by the reconciler afterwards.
#[derive(Debug, Default)]
pub struct ResultCollector {
    touched: BTreeSet<PathBuf>,
    messages: BTreeMap<ParticipantKey, Vec<CollectedMessage>>,
    retractions: BTreeSet<(ParticipantKey, PathBuf)>,
    failures: Vec<RecordedFailure>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the collector to a participant key for the duration of one
    /// step. All participant-facing writes go through the returned handle.
    pub fn bound(&mut self, key: &ParticipantKey) -> BoundCollector<'_> {
        BoundCollector {
            key: key.clone(),
            collector: self,
        }
    }

    /// Files touched so far in this build, in path order. The scheduler
    /// diffs this around each step to compute per-step touch sets.
    pub fn touched_files(&self) -> &BTreeSet<PathBuf> {
        &self.touched
    }

    /// Record a failure against a key, or against no key for failures of
    /// the pipeline machinery itself.
    pub fn record_failure(&mut self, key: Option<ParticipantKey>, error: anyhow::Error) {
        self.failures.push(RecordedFailure { key, error });
    }

    pub fn message_count(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    pub(crate) fn take_messages(&mut self) -> BTreeMap<ParticipantKey, Vec<CollectedMessage>> {
        std::mem::take(&mut self.messages)
    }

    pub(crate) fn take_retractions(&mut self) -> BTreeSet<(ParticipantKey, PathBuf)> {
        std::mem::take(&mut self.retractions)
    }

    pub(crate) fn take_failures(&mut self) -> Vec<RecordedFailure> {
        std::mem::take(&mut self.failures)
    }

    pub(crate) fn into_touched(self) -> BTreeSet<PathBuf> {
        self.touched
    }
}

/// Participant-facing view of the collector, bound to one key for one
/// step. Messages recorded through it are attributed to that key and are
/// never overwritten by another participant.
#[derive(Debug)]
pub struct BoundCollector<'a> {
    key: ParticipantKey,
    collector: &'a mut ResultCollector,
}

impl BoundCollector<'_> {
    pub fn key(&self) -> &ParticipantKey {
        &self.key
    }

    /// Record a file created or rewritten by this step, for post-build
    /// refresh and for the debug observation diff.
    pub fn record_touched_file(&mut self, path: impl Into<PathBuf>) {
        self.collector.touched.insert(path.into());
    }

    /// Append a message under the bound key. Absent `text` falls back to
    /// the cause's description.
    pub fn add_message(
        &mut self,
        location: SourceLocation,
        text: Option<&str>,
        severity: Severity,
        cause: Option<&anyhow::Error>,
    ) {
        let message = CollectedMessage::from_parts(location, text, severity, cause);
        self.collector
            .messages
            .entry(self.key.clone())
            .or_default()
            .push(message);
    }

    /// Schedule retraction of the bound key's previously published
    /// diagnostics for `file`. Applied by the reconciler before any new
    /// messages for the same key/file are published.
    pub fn clear_messages_for(&mut self, file: impl Into<PathBuf>) {
        self.collector
            .retractions
            .insert((self.key.clone(), file.into()));
    }
}
