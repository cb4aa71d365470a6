//! buildloom - incremental build orchestration engine
//!
//! This library decides, per build request, whether a build is actually
//! needed, runs an ordered set of pluggable build participants contributed
//! by the project's configured phases, collects their side effects
//! (diagnostics, touched files), reconciles those diagnostics against
//! previous state, and guarantees the underlying project model is not
//! corrupted by participant execution.
//!
//! # Core Concepts
//!
//! - **Participants**: pluggable units of build logic, each bound to one
//!   configured phase key for one build invocation
//! - **Change-set relevance**: changes confined to the project's own
//!   output directory or to nested sub-module trees short-circuit the
//!   build entirely
//! - **Partial-failure isolation**: one participant's failure becomes a
//!   diagnostic attributed to its phase, never an abort of the pipeline
//! - **Snapshot/restore**: the project's transient model fields are
//!   captured before the first participant and restored on every exit
//!   path, including cancellation
//!
//! # Example Usage
//!
//! ```ignore
//! use buildloom::engine::{BuildPlan, BuildScheduler};
//! use buildloom::model::{BuildKind, ParticipantKey, Project};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn build(project: &mut Project) -> anyhow::Result<()> {
//!     let scheduler = BuildScheduler::builder().build();
//!     let plan = BuildPlan::new()
//!         .phase(ParticipantKey::new("compiler", "compile", "default"), vec![/* ... */]);
//!     let mut sink = buildloom::diagnostics::InMemoryDiagnostics::new();
//!
//!     let report = scheduler
//!         .run(project, plan, None, BuildKind::Full, &CancellationToken::new(), &mut sink)
//!         .await?;
//!     println!("dependent projects: {:?}", report.dependents);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`model`]: projects, change sets, keys and diagnostic value types
//! - [`engine`]: the pipeline (filter, collector, guard, contexts,
//!   scheduler, reconciler)
//! - [`observe`]: the read-only debug observation channel
//! - [`diagnostics`]: the external diagnostics-sink seam

// Public modules
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod model;
pub mod observe;
pub mod util;

// Re-export key types for convenient access
pub use diagnostics::{DiagnosticsSink, InMemoryDiagnostics};
pub use engine::{
    BuildPlan, BuildReport, BuildScheduler, BuildState, IncrementalAdapter,
    IncrementalContextRegistry, Participant, StepContext,
};
pub use error::EngineError;
pub use model::{
    BuildKind, ChangeKind, ChangeSet, Diagnostic, ParticipantKey, Project, ProjectId,
    Severity, SourceLocation,
};
pub use observe::{BuildEvent, BuildObserver, DebugObserverRegistry, LoggingObserver};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_buildloom() {
        assert_eq!(NAME, "buildloom");
    }
}
