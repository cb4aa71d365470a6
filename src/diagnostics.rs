//! Diagnostics sink abstraction
//!
//! The engine's only contract with the external diagnostics store:
//! delete diagnostics owned by a (key, file) pair, and add a diagnostic
//! with message, location, severity and key metadata. An in-memory
//! implementation backs the tests and doubles as the reference sink.

use crate::model::{Diagnostic, ParticipantKey};
use anyhow::Result;
use std::path::Path;

/// Target store for published diagnostics
pub trait DiagnosticsSink: Send {
    /// Remove every diagnostic owned by `key` for `file`. Returns how
    /// many were removed. Diagnostics owned by other keys are untouched.
    fn retract(&mut self, key: Option<&ParticipantKey>, file: &Path) -> Result<usize>;

    /// Add a diagnostic record
    fn publish(&mut self, diagnostic: Diagnostic) -> Result<()>;
}

/// In-memory diagnostics store
#[derive(Debug, Default)]
pub struct InMemoryDiagnostics {
    records: Vec<Diagnostic>,
}

impl InMemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn for_file(&self, file: &Path) -> Vec<&Diagnostic> {
        self.records
            .iter()
            .filter(|d| d.location.file == file)
            .collect()
    }

    pub fn owned_by(&self, key: Option<&ParticipantKey>) -> Vec<&Diagnostic> {
        self.records
            .iter()
            .filter(|d| d.key.as_ref() == key)
            .collect()
    }
}

impl DiagnosticsSink for InMemoryDiagnostics {
    fn retract(&mut self, key: Option<&ParticipantKey>, file: &Path) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|d| !d.owned_by(key, file));
        Ok(before - self.records.len())
    }

    fn publish(&mut self, diagnostic: Diagnostic) -> Result<()> {
        self.records.push(diagnostic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Severity, SourceLocation};
    use std::path::PathBuf;

    fn diag(key: Option<ParticipantKey>, file: &str, text: &str) -> Diagnostic {
        Diagnostic {
            location: SourceLocation::top_of(file),
            text: text.to_string(),
            severity: Severity::Error,
            key,
        }
    }

    #[test]
    fn test_retract_targets_only_owning_key() {
        let k1 = ParticipantKey::new("p", "g", "one");
        let k2 = ParticipantKey::new("p", "g", "two");
        let mut sink = InMemoryDiagnostics::new();
        sink.publish(diag(Some(k1.clone()), "a.rs", "from k1")).unwrap();
        sink.publish(diag(Some(k2.clone()), "a.rs", "from k2")).unwrap();
        sink.publish(diag(None, "a.rs", "pipeline")).unwrap();

        let removed = sink.retract(Some(&k1), Path::new("a.rs")).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(sink.for_file(Path::new("a.rs")).len(), 2);
        assert!(sink.owned_by(Some(&k1)).is_empty());
        assert_eq!(sink.owned_by(Some(&k2)).len(), 1);
    }

    #[test]
    fn test_retract_is_scoped_to_file() {
        let k = ParticipantKey::new("p", "g", "e");
        let mut sink = InMemoryDiagnostics::new();
        sink.publish(diag(Some(k.clone()), "a.rs", "one")).unwrap();
        sink.publish(diag(Some(k.clone()), "b.rs", "two")).unwrap();

        sink.retract(Some(&k), Path::new("a.rs")).unwrap();
        assert!(sink.for_file(Path::new("a.rs")).is_empty());
        assert_eq!(sink.for_file(Path::new("b.rs")).len(), 1);
    }

    #[test]
    fn test_retract_missing_is_zero() {
        let k = ParticipantKey::new("p", "g", "e");
        let mut sink = InMemoryDiagnostics::new();
        let removed = sink.retract(Some(&k), &PathBuf::from("nowhere.rs")).unwrap();
        assert_eq!(removed, 0);
    }
}
