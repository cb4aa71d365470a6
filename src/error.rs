//! Engine error taxonomy
//!
//! Participant, adapter and pipeline-level failures are data: they are
//! recorded in the collector and reconciled into diagnostics, never
//! propagated as errors. The one outcome that does surface as an error is
//! cooperative cancellation, which the scheduler raises only after the
//! unconditional restore/release steps have run.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by [`crate::engine::BuildScheduler::run`]
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller's cancellation token fired between participant steps.
    /// State restore and context release have already completed.
    #[error("build {build_id} canceled")]
    Canceled { build_id: Uuid },
}
