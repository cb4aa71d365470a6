//! Participant key: stable identity of a configured build phase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a configured build phase: the owning plugin and
/// goal plus the execution id that distinguishes repeated configurations
/// of the same goal. Diagnostics and results aggregate under this key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantKey {
    pub plugin: String,
    pub goal: String,
    pub execution: String,
}

impl ParticipantKey {
    pub fn new(
        plugin: impl Into<String>,
        goal: impl Into<String>,
        execution: impl Into<String>,
    ) -> Self {
        Self {
            plugin: plugin.into(),
            goal: goal.into(),
            execution: execution.into(),
        }
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.plugin, self.goal, self.execution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let key = ParticipantKey::new("org.example:compiler", "compile", "default-compile");
        assert_eq!(key.to_string(), "org.example:compiler:compile@default-compile");
    }

    #[test]
    fn test_keys_distinguish_executions() {
        let a = ParticipantKey::new("p", "g", "one");
        let b = ParticipantKey::new("p", "g", "two");
        assert_ne!(a, b);
        assert!(a < b);
    }
}
