//! The incremental build pipeline: relevance filtering, result
//! collection, state protection, incremental contexts, scheduling and
//! diagnostics reconciliation

pub mod collector;
pub mod contexts;
pub mod filter;
pub mod guard;
pub mod participant;
pub mod reconciler;
pub mod scheduler;

pub use collector::{BoundCollector, RecordedFailure, ResultCollector};
pub use contexts::{BuildContext, IncrementalAdapter, IncrementalContextRegistry};
pub use guard::{restore, snapshot, StateSnapshot};
pub use participant::{BuildPlan, Participant, PhaseEntry, StepContext};
pub use reconciler::ReconcileStats;
pub use scheduler::{BuildReport, BuildScheduler, BuildSchedulerBuilder, BuildState};
