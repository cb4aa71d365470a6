//! Snapshot/restore protection for the mutable project model
//!
//! Participants may mutate a project's transient model fields during a
//! build. The guard captures exactly those fields before the first
//! participant runs and restores them unconditionally afterwards, so a
//! failing participant can never leak half-applied state into the next
//! build.

use crate::model::{Project, ProjectModel};

/// Opaque capture of a project's transient model fields. Consumed by
/// [`restore`], which makes a second restore of the same snapshot
/// unrepresentable.
#[derive(Debug)]
pub struct StateSnapshot {
    model: ProjectModel,
}

/// Capture the mutable model fields of `project`. Identity and structural
/// configuration (descriptor, output dir, modules) are not captured; the
/// engine never mutates those.
pub fn snapshot(project: &Project) -> StateSnapshot {
    StateSnapshot {
        model: project.model.clone(),
    }
}

/// Put the captured fields back, discarding whatever participants left
/// behind. Runs on every exit path of a build, including cancellation.
pub fn restore(snapshot: StateSnapshot, project: &mut Project) {
    project.model = snapshot.model;
}
