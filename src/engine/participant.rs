//! Participant seam: the pluggable unit of build logic and the ordered
//! plan the scheduler iterates
//!
//! The scheduler performs no registry lookups of its own; the external
//! project-model provider assembles a [`BuildPlan`] of phases in the exact
//! order they must run and hands it over per build. Plans are consumed by
//! value, so no participant instance outlives the build it was created
//! for.

use crate::engine::collector::BoundCollector;
use crate::engine::contexts::BuildContext;
use crate::model::{ParticipantKey, Project, ProjectId, ResourceDelta, SourceLocation};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Everything a participant sees for one step of one build
pub struct StepContext<'a> {
    /// The project under build; transient model fields may be mutated and
    /// are restored after the build
    pub project: &'a mut Project,

    /// Read-only view of this build's filesystem changes
    pub delta: ResourceDelta<'a>,

    /// Result sink bound to this participant's key
    pub collector: BoundCollector<'a>,

    /// Primary incremental-build context, when any adapter opened one
    pub context: Option<&'a mut dyn BuildContext>,
}

impl StepContext<'_> {
    pub fn key(&self) -> &ParticipantKey {
        self.collector.key()
    }
}

/// A unit of pluggable build logic, bound to exactly one participant key
/// for exactly one build invocation.
#[async_trait]
pub trait Participant: Send {
    /// Opt in to being invoked even when an incremental build carries an
    /// empty delta. Defaults to off: such participants are skipped.
    fn runs_on_empty_delta(&self) -> bool {
        false
    }

    /// Run the participant. Returns the projects whose state this
    /// participant's output affects; an error is recorded against the
    /// participant's key and never aborts the rest of the pipeline.
    async fn build(&mut self, step: &mut StepContext<'_>) -> anyhow::Result<BTreeSet<ProjectId>>;
}

/// One configured phase: a key, the descriptor location of its
/// configuration (for placing failure diagnostics), and the participants
/// it contributes, in execution order.
pub struct PhaseEntry {
    pub key: ParticipantKey,
    pub source: Option<SourceLocation>,
    pub participants: Vec<Box<dyn Participant>>,
}

/// Ordered set of phases for one build invocation
#[derive(Default)]
pub struct BuildPlan {
    phases: Vec<PhaseEntry>,
}

impl BuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase with no configuration source location
    pub fn phase(self, key: ParticipantKey, participants: Vec<Box<dyn Participant>>) -> Self {
        self.phase_at(key, None, participants)
    }

    /// Append a phase carrying the location of its configuration inside
    /// the project descriptor
    pub fn phase_at(
        mut self,
        key: ParticipantKey,
        source: Option<SourceLocation>,
        participants: Vec<Box<dyn Participant>>,
    ) -> Self {
        self.phases.push(PhaseEntry {
            key,
            source,
            participants,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// (key, participant count) per phase, in order; what observers see
    /// at build start.
    pub fn summary(&self) -> Vec<(ParticipantKey, usize)> {
        self.phases
            .iter()
            .map(|p| (p.key.clone(), p.participants.len()))
            .collect()
    }

    pub(crate) fn into_phases(self) -> Vec<PhaseEntry> {
        self.phases
    }
}
