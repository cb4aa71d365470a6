//! Build observer trait and events

use crate::model::{BuildKind, ParticipantKey, ProjectId};
use std::collections::BTreeSet;
use std::path::PathBuf;
use uuid::Uuid;

/// Read-only lifecycle events fanned out to debug observers. Observers
/// cannot influence scheduling decisions or collected results.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Pipeline is about to run its first participant
    BuildStarted {
        build_id: Uuid,
        project: ProjectId,
        kind: BuildKind,
        /// (key, participant count) per phase, in execution order
        phases: Vec<(ParticipantKey, usize)>,
    },

    /// One participant step finished (successfully or not)
    StepCompleted {
        build_id: Uuid,
        key: ParticipantKey,
        /// Files this step touched, as a set difference around the step
        touched: BTreeSet<PathBuf>,
        failed: bool,
    },
}

/// Trait for observing pipeline lifecycle events
pub trait BuildObserver: Send + Sync {
    /// Called for each lifecycle event
    fn on_event(&self, event: &BuildEvent);
}

/// No-op observer that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl BuildObserver for NoOpObserver {
    fn on_event(&self, _event: &BuildEvent) {
        // Intentionally empty
    }
}
