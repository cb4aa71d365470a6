//! Diagnostic value types: severities, source locations, collected
//! messages and published records

use crate::model::key::ParticipantKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a collected message or published diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A file/line/column position, project-relative
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Default location when nothing better is resolvable: line 1,
    /// column 1 of the given file.
    pub fn top_of(file: impl Into<PathBuf>) -> Self {
        Self::new(file, 1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A message recorded by one participant during one build, prior to
/// reconciliation. Always attributed to exactly one participant key by
/// the collector that accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedMessage {
    pub location: SourceLocation,
    pub text: String,
    pub severity: Severity,

    /// Description of the underlying cause, when one was supplied
    pub cause: Option<String>,
}

impl CollectedMessage {
    /// Build a message from optional text and an optional cause. Absent
    /// text falls back to the cause's description; a message with
    /// neither gets a fixed placeholder.
    pub fn from_parts(
        location: SourceLocation,
        text: Option<&str>,
        severity: Severity,
        cause: Option<&anyhow::Error>,
    ) -> Self {
        let cause_text = cause.map(|e| format!("{e:#}"));
        let text = match text {
            Some(t) => t.to_string(),
            None => cause_text
                .clone()
                .unwrap_or_else(|| "unknown build problem".to_string()),
        };
        Self {
            location,
            text,
            severity,
            cause: cause_text,
        }
    }
}

/// A published problem record, attached to a file/location and owned by
/// the participant key that produced it. `key == None` marks the
/// pipeline's own top-level error handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub location: SourceLocation,
    pub text: String,
    pub severity: Severity,
    pub key: Option<ParticipantKey>,
}

impl Diagnostic {
    pub fn owned_by(&self, key: Option<&ParticipantKey>, file: &Path) -> bool {
        self.key.as_ref() == key && self.location.file == file
    }
}
