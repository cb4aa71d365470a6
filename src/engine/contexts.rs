//! Incremental-build-framework adapters and their per-build contexts
//!
//! Adapters are compatibility shims discovered by the embedder and handed
//! to the registry as an ordered list. Each adapter opens one
//! [`BuildContext`] per build; the first opened context is the primary one
//! bound into participant steps, the rest are observational. Adapter
//! failures are logged and skipped, never fatal to the build.

use crate::model::{BuildKind, ChangeSet, Project};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle returned by an incremental-build-framework adapter. Released
/// exactly once per build, on every exit path.
#[async_trait]
pub trait BuildContext: Send {
    /// Adapter-supplied name, used in logs only
    fn name(&self) -> &str;

    /// Release the context. Called once by the registry at build end.
    async fn release(&mut self) -> anyhow::Result<()>;
}

/// A pluggable incremental-build-framework shim
#[async_trait]
pub trait IncrementalAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn open(
        &self,
        project: &Project,
        kind: BuildKind,
        change_set: Option<&ChangeSet>,
    ) -> anyhow::Result<Box<dyn BuildContext>>;
}

/// Ordered set of adapters, injected at engine construction
#[derive(Clone, Default)]
pub struct IncrementalContextRegistry {
    adapters: Vec<Arc<dyn IncrementalAdapter>>,
}

impl IncrementalContextRegistry {
    pub fn new(adapters: Vec<Arc<dyn IncrementalAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Open one context per adapter, in registration order. An adapter
    /// that fails to open is skipped with a warning; the others still get
    /// their context.
    pub async fn open_all(
        &self,
        project: &Project,
        kind: BuildKind,
        change_set: Option<&ChangeSet>,
    ) -> Vec<Box<dyn BuildContext>> {
        let mut contexts = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            match adapter.open(project, kind, change_set).await {
                Ok(context) => {
                    debug!(adapter = adapter.name(), project = %project.id, "Opened build context");
                    contexts.push(context);
                }
                Err(error) => {
                    warn!(
                        adapter = adapter.name(),
                        project = %project.id,
                        error = %format!("{error:#}"),
                        "Adapter failed to open build context, skipping"
                    );
                }
            }
        }
        contexts
    }

    /// Release every context in open order. A failing release is logged
    /// and does not prevent the remaining contexts from releasing.
    pub async fn close_all(&self, contexts: Vec<Box<dyn BuildContext>>) {
        for mut context in contexts {
            if let Err(error) = context.release().await {
                warn!(
                    context = context.name(),
                    error = %format!("{error:#}"),
                    "Build context failed to release"
                );
            }
        }
    }
}
