//! Participant scheduler
//!
//! Runs one build invocation end to end: relevance filtering, state
//! snapshot, incremental context setup, the participant loop with
//! per-step failure isolation, unconditional restore/release, and
//! diagnostics reconciliation. Phases and participants run strictly in
//! the caller-supplied order; cancellation is checked between steps.

use crate::diagnostics::DiagnosticsSink;
use crate::engine::collector::ResultCollector;
use crate::engine::contexts::{BuildContext, IncrementalContextRegistry};
use crate::engine::participant::{BuildPlan, StepContext};
use crate::engine::{filter, guard, reconciler};
use crate::error::EngineError;
use crate::model::{BuildKind, ChangeSet, Project, ProjectId, ResourceDelta, SourceLocation};
use crate::observe::{BuildEvent, DebugObserverRegistry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Lifecycle of one build invocation. `ShortCircuited` and `Done` are the
/// terminal states; every non-short-circuit path reaches `Restoring`
/// before `Reconciling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildState {
    NotStarted,
    Filtering,
    ShortCircuited,
    Snapshotting,
    RunningParticipants,
    Restoring,
    Reconciling,
    Done,
}

/// What one build produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub build_id: Uuid,

    /// Projects whose state the participants' output affects; the caller
    /// considers these for subsequent builds
    pub dependents: BTreeSet<ProjectId>,

    /// Files participants touched, for the caller's resource refresh
    pub touched_files: BTreeSet<PathBuf>,

    /// Diagnostics published by reconciliation
    pub published: usize,

    /// Diagnostics retracted by reconciliation
    pub retracted: usize,

    /// Terminal state the build reached
    pub state: BuildState,
}

struct StateTracker {
    build_id: Uuid,
    state: BuildState,
}

impl StateTracker {
    fn new(build_id: Uuid) -> Self {
        Self {
            build_id,
            state: BuildState::NotStarted,
        }
    }

    fn advance(&mut self, next: BuildState) {
        debug!(build = %self.build_id, from = ?self.state, to = ?next, "Build state transition");
        self.state = next;
    }
}

/// The build orchestration engine. Holds the injected incremental-context
/// registry and the shared debug observer registry; projects, plans,
/// change sets and the diagnostics sink arrive per build.
pub struct BuildScheduler {
    contexts: IncrementalContextRegistry,
    observers: DebugObserverRegistry,
}

impl BuildScheduler {
    pub fn builder() -> BuildSchedulerBuilder {
        BuildSchedulerBuilder::default()
    }

    pub fn observers(&self) -> &DebugObserverRegistry {
        &self.observers
    }

    /// Run one build invocation.
    ///
    /// Nothing escapes as an error under normal operation: participant
    /// and adapter problems become diagnostics, and the only `Err` is
    /// [`EngineError::Canceled`], raised after restore and release have
    /// completed.
    pub async fn run(
        &self,
        project: &mut Project,
        plan: BuildPlan,
        change_set: Option<ChangeSet>,
        kind: BuildKind,
        cancel: &CancellationToken,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<BuildReport, EngineError> {
        let build_id = Uuid::new_v4();
        let start = Instant::now();
        let mut state = StateTracker::new(build_id);
        info!(build = %build_id, project = %project.id, kind = ?kind, "Starting build");

        state.advance(BuildState::Filtering);
        if !filter::is_relevant(project, change_set.as_ref()) {
            state.advance(BuildState::ShortCircuited);
            info!(build = %build_id, project = %project.id, "No relevant changes, build skipped");
            return Ok(BuildReport {
                build_id,
                dependents: BTreeSet::from([project.id.clone()]),
                touched_files: BTreeSet::new(),
                published: 0,
                retracted: 0,
                state: state.state,
            });
        }

        state.advance(BuildState::Snapshotting);
        let snapshot = guard::snapshot(project);
        let mut contexts = self
            .contexts
            .open_all(project, kind, change_set.as_ref())
            .await;

        self.observers.notify(&BuildEvent::BuildStarted {
            build_id,
            project: project.id.clone(),
            kind,
            phases: plan.summary(),
        });

        let mut collector = ResultCollector::new();
        let mut dependents: BTreeSet<ProjectId> = BTreeSet::new();
        let mut phase_sources: BTreeMap<_, SourceLocation> = BTreeMap::new();
        let mut canceled = false;

        state.advance(BuildState::RunningParticipants);
        'phases: for phase in plan.into_phases() {
            if let Some(source) = &phase.source {
                phase_sources.insert(phase.key.clone(), source.clone());
            }
            info!(build = %build_id, phase = %phase.key, participants = phase.participants.len(), "Phase");

            for mut participant in phase.participants {
                if cancel.is_cancelled() {
                    canceled = true;
                    break 'phases;
                }

                let delta = ResourceDelta::new(change_set.as_ref());
                let applicable = kind == BuildKind::Full
                    || delta.has_changes()
                    || participant.runs_on_empty_delta();
                if !applicable {
                    debug!(build = %build_id, phase = %phase.key, "Skipping participant, empty delta");
                    continue;
                }

                let touched_before = collector.touched_files().clone();
                let step_start = Instant::now();
                let result = {
                    let mut step = StepContext {
                        project: &mut *project,
                        delta,
                        collector: collector.bound(&phase.key),
                        context: contexts.first_mut().map(|c| &mut **c as &mut dyn BuildContext),
                    };
                    participant.build(&mut step).await
                };

                let failed = result.is_err();
                match result {
                    Ok(step_dependents) => {
                        debug!(
                            build = %build_id,
                            phase = %phase.key,
                            dependents = step_dependents.len(),
                            duration_ms = step_start.elapsed().as_millis(),
                            "Participant complete"
                        );
                        dependents.extend(step_dependents);
                    }
                    Err(error) => {
                        warn!(
                            build = %build_id,
                            phase = %phase.key,
                            error = %format!("{error:#}"),
                            "Participant failed, continuing with remaining phases"
                        );
                        collector.record_failure(Some(phase.key.clone()), error);
                    }
                }

                let touched: BTreeSet<PathBuf> = collector
                    .touched_files()
                    .difference(&touched_before)
                    .cloned()
                    .collect();
                self.observers.notify(&BuildEvent::StepCompleted {
                    build_id,
                    key: phase.key.clone(),
                    touched,
                    failed,
                });
            }
        }

        // Unconditional cleanup: restore first, then release, on every
        // path out of the participant loop.
        state.advance(BuildState::Restoring);
        guard::restore(snapshot, project);
        self.contexts.close_all(contexts).await;

        if canceled {
            info!(build = %build_id, project = %project.id, "Build canceled after cleanup");
            return Err(EngineError::Canceled { build_id });
        }

        state.advance(BuildState::Reconciling);
        let stats = reconciler::reconcile(&mut collector, project, &phase_sources, sink);

        state.advance(BuildState::Done);
        info!(
            build = %build_id,
            project = %project.id,
            dependents = dependents.len(),
            published = stats.published,
            retracted = stats.retracted,
            duration_ms = start.elapsed().as_millis(),
            "Build complete"
        );
        Ok(BuildReport {
            build_id,
            dependents,
            touched_files: collector.into_touched(),
            published: stats.published,
            retracted: stats.retracted,
            state: state.state,
        })
    }
}

/// Builder for [`BuildScheduler`]: the embedder injects the adapter list
/// and, optionally, a shared observer registry.
#[derive(Default)]
pub struct BuildSchedulerBuilder {
    contexts: IncrementalContextRegistry,
    observers: Option<DebugObserverRegistry>,
}

impl BuildSchedulerBuilder {
    pub fn contexts(mut self, registry: IncrementalContextRegistry) -> Self {
        self.contexts = registry;
        self
    }

    pub fn observers(mut self, registry: DebugObserverRegistry) -> Self {
        self.observers = Some(registry);
        self
    }

    pub fn build(self) -> BuildScheduler {
        BuildScheduler {
            contexts: self.contexts,
            observers: self.observers.unwrap_or_default(),
        }
    }
}
