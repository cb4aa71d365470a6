//! Domain data model: projects, change sets, participant keys and
//! diagnostic value types

pub mod changeset;
pub mod diagnostic;
pub mod key;
pub mod project;

pub use changeset::{BuildKind, ChangeKind, ChangeSet, ResourceDelta};
pub use diagnostic::{CollectedMessage, Diagnostic, Severity, SourceLocation};
pub use key::ParticipantKey;
pub use project::{Project, ProjectId, ProjectModel};
