//! Change-set relevance filter
//!
//! Decides whether a set of filesystem changes justifies running the
//! participant pipeline at all. Changes confined to the project's own
//! output directory or to a nested sub-module's tree are not relevant to
//! this project's build: the output is the build's own previous work, and
//! an affected sub-module is built separately.

use crate::model::{ChangeSet, Project};
use tracing::debug;

/// Check whether `change_set` warrants a build of `project`.
///
/// An absent change set always forces a full run. A present change set is
/// relevant as soon as one changed path lies outside both the declared
/// output directory and every declared sub-module tree. An empty present
/// change set is never relevant, even for a project with no declared
/// sub-modules.
pub fn is_relevant(project: &Project, change_set: Option<&ChangeSet>) -> bool {
    let Some(change_set) = change_set else {
        return true;
    };

    for (path, kind) in change_set.iter() {
        if project.is_output_path(path) {
            continue;
        }
        if project.is_module_path(path) {
            continue;
        }
        debug!(
            project = %project.id,
            path = %path.display(),
            kind = ?kind,
            "Relevant change found"
        );
        return true;
    }

    debug!(project = %project.id, changes = change_set.len(), "No relevant changes");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeKind;
    use yare::parameterized;

    fn project() -> Project {
        Project::new("app", "/work/app")
            .with_output_dir("target")
            .with_module("core")
    }

    #[test]
    fn test_absent_change_set_is_always_relevant() {
        assert!(is_relevant(&project(), None));
    }

    #[test]
    fn test_empty_change_set_is_not_relevant() {
        let cs = ChangeSet::new();
        assert!(!is_relevant(&project(), Some(&cs)));
    }

    // Pins the asymmetry between the absent and empty-present cases for a
    // project with zero declared sub-modules.
    #[test]
    fn test_empty_change_set_without_modules_is_not_relevant() {
        let bare = Project::new("bare", "/work/bare");
        assert!(!is_relevant(&bare, Some(&ChangeSet::new())));
        assert!(is_relevant(&bare, None));
    }

    #[parameterized(
        source_change = { "src/main.rs", true },
        descriptor_change = { "project.xml", true },
        output_change = { "target/classes/App.class", false },
        module_change = { "core/src/lib.rs", false },
        module_descriptor = { "core/project.xml", false },
        sibling_of_output = { "target2/file.txt", true },
    )]
    fn test_single_change_relevance(path: &str, expected: bool) {
        let cs = ChangeSet::new().with(path, ChangeKind::Changed);
        assert_eq!(is_relevant(&project(), Some(&cs)), expected);
    }

    #[test]
    fn test_mixed_changes_need_only_one_relevant_path() {
        let cs = ChangeSet::new()
            .with("target/out.jar", ChangeKind::Added)
            .with("core/src/lib.rs", ChangeKind::Changed)
            .with("src/main.rs", ChangeKind::Changed);
        assert!(is_relevant(&project(), Some(&cs)));
    }

    #[test]
    fn test_only_filtered_changes_are_not_relevant() {
        let cs = ChangeSet::new()
            .with("target/out.jar", ChangeKind::Added)
            .with("core/src/lib.rs", ChangeKind::Removed);
        assert!(!is_relevant(&project(), Some(&cs)));
    }
}
