//! Project identity and mutable model fields

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identity of a buildable project
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Mutable project-model fields that participants may touch transiently
/// during a build. Everything else on [`Project`] is structural and
/// read-only from the engine's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Derived/cached key-value properties
    pub properties: BTreeMap<String, String>,

    /// Output artifacts recorded by participants (project-relative)
    pub derived_outputs: BTreeSet<PathBuf>,
}

/// The unit of build: a module with its own descriptor, output location
/// and declared sub-modules. Owned by the external project-model provider;
/// the engine reads it, except for [`Project::model`] which participants
/// may mutate under snapshot/restore protection.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,

    /// Absolute path of the project root
    pub base_dir: PathBuf,

    /// Primary build descriptor, project-relative (default location for
    /// diagnostics that have no better source)
    pub descriptor: PathBuf,

    /// Build output directory, project-relative
    pub output_dir: PathBuf,

    /// Declared sub-module locations, project-relative
    pub modules: Vec<PathBuf>,

    /// Transiently mutable model fields
    pub model: ProjectModel,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            base_dir: base_dir.into(),
            descriptor: PathBuf::from("project.xml"),
            output_dir: PathBuf::from("target"),
            modules: Vec::new(),
            model: ProjectModel::default(),
        }
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<PathBuf>) -> Self {
        self.descriptor = descriptor.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_module(mut self, module: impl Into<PathBuf>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Check whether `path` (project-relative) falls under the declared
    /// output directory.
    pub fn is_output_path(&self, path: &Path) -> bool {
        path.starts_with(&self.output_dir)
    }

    /// Check whether `path` (project-relative) falls inside one of the
    /// declared sub-module trees.
    pub fn is_module_path(&self, path: &Path) -> bool {
        self.modules.iter().any(|m| path.starts_with(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_display() {
        let id = ProjectId::new("org.example:app");
        assert_eq!(id.to_string(), "org.example:app");
        assert_eq!(id.as_str(), "org.example:app");
    }

    #[test]
    fn test_output_path_detection() {
        let project = Project::new("app", "/work/app").with_output_dir("target");
        assert!(project.is_output_path(Path::new("target/classes/A.class")));
        assert!(!project.is_output_path(Path::new("src/A.java")));
    }

    #[test]
    fn test_module_path_detection() {
        let project = Project::new("parent", "/work/parent")
            .with_module("core")
            .with_module("web");
        assert!(project.is_module_path(Path::new("core/src/lib.rs")));
        assert!(project.is_module_path(Path::new("web/project.xml")));
        assert!(!project.is_module_path(Path::new("src/main.rs")));
    }

    #[test]
    fn test_default_descriptor_and_output() {
        let project = Project::new("app", "/work/app");
        assert_eq!(project.descriptor, PathBuf::from("project.xml"));
        assert_eq!(project.output_dir, PathBuf::from("target"));
        assert!(project.modules.is_empty());
    }
}
