//! Post-build diagnostics reconciliation
//!
//! Turns the collector's accumulated state into persistent diagnostics:
//! scheduled retractions are applied first, then new messages are
//! published under their owning keys, then recorded failures become
//! diagnostics at the best-known source location for their phase. Sink
//! failures are logged and do not abort reconciliation of the remaining
//! records.

use crate::diagnostics::DiagnosticsSink;
use crate::engine::collector::ResultCollector;
use crate::model::{Diagnostic, ParticipantKey, Project, Severity, SourceLocation};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Counts returned to the caller as the diagnostics delta of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub published: usize,
    pub retracted: usize,
}

/// Reconcile everything the build collected against the diagnostics sink.
///
/// `phase_sources` maps participant keys to the descriptor location of
/// their phase configuration; failures for keys without one, and keyless
/// pipeline failures, land at the top of the project descriptor.
pub fn reconcile(
    collector: &mut ResultCollector,
    project: &Project,
    phase_sources: &BTreeMap<ParticipantKey, SourceLocation>,
    sink: &mut dyn DiagnosticsSink,
) -> ReconcileStats {
    let mut stats = ReconcileStats::default();

    for (key, file) in collector.take_retractions() {
        match sink.retract(Some(&key), &file) {
            Ok(removed) => {
                stats.retracted += removed;
                debug!(key = %key, file = %file.display(), removed, "Retracted diagnostics");
            }
            Err(error) => {
                warn!(
                    key = %key,
                    file = %file.display(),
                    error = %format!("{error:#}"),
                    "Failed to retract diagnostics"
                );
            }
        }
    }

    for (key, messages) in collector.take_messages() {
        for message in messages {
            let diagnostic = Diagnostic {
                location: message.location,
                text: message.text,
                severity: message.severity,
                key: Some(key.clone()),
            };
            publish(sink, diagnostic, &mut stats);
        }
    }

    for failure in collector.take_failures() {
        let location = failure
            .key
            .as_ref()
            .and_then(|k| phase_sources.get(k).cloned())
            .unwrap_or_else(|| SourceLocation::top_of(&project.descriptor));
        let text = match &failure.key {
            Some(key) => format!("Build participant {key} failed: {:#}", failure.error),
            None => format!("Build pipeline failed: {:#}", failure.error),
        };
        let diagnostic = Diagnostic {
            location,
            text,
            severity: Severity::Error,
            key: failure.key,
        };
        publish(sink, diagnostic, &mut stats);
    }

    stats
}

fn publish(sink: &mut dyn DiagnosticsSink, diagnostic: Diagnostic, stats: &mut ReconcileStats) {
    match sink.publish(diagnostic) {
        Ok(()) => stats.published += 1,
        Err(error) => {
            warn!(error = %format!("{error:#}"), "Failed to publish diagnostic");
        }
    }
}
