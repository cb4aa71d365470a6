//! Logging-based build observer

use super::handler::{BuildEvent, BuildObserver};
use tracing::{debug, info, warn};

/// Observer that logs build events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl BuildObserver for LoggingObserver {
    fn on_event(&self, event: &BuildEvent) {
        match event {
            BuildEvent::BuildStarted {
                build_id,
                project,
                kind,
                phases,
            } => {
                info!(
                    build = %build_id,
                    project = %project,
                    kind = ?kind,
                    phases = phases.len(),
                    "Build started"
                );
                for (key, participants) in phases {
                    debug!(build = %build_id, phase = %key, participants, "Planned phase");
                }
            }
            BuildEvent::StepCompleted {
                build_id,
                key,
                touched,
                failed,
            } => {
                if *failed {
                    warn!(
                        build = %build_id,
                        phase = %key,
                        touched = touched.len(),
                        "Participant step failed"
                    );
                } else {
                    debug!(
                        build = %build_id,
                        phase = %key,
                        touched = touched.len(),
                        "Participant step complete"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildKind, ParticipantKey, ProjectId};
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use uuid::Uuid;

    #[test]
    fn test_logging_all_events() {
        let observer = LoggingObserver;
        let build_id = Uuid::new_v4();
        let key = ParticipantKey::new("p", "g", "e");

        // All event shapes must log without panicking
        let events = vec![
            BuildEvent::BuildStarted {
                build_id,
                project: ProjectId::new("app"),
                kind: BuildKind::Full,
                phases: vec![(key.clone(), 2)],
            },
            BuildEvent::StepCompleted {
                build_id,
                key: key.clone(),
                touched: BTreeSet::from([PathBuf::from("target/a.o")]),
                failed: false,
            },
            BuildEvent::StepCompleted {
                build_id,
                key,
                touched: BTreeSet::new(),
                failed: true,
            },
        ];

        for event in events {
            observer.on_event(&event);
        }
    }
}
