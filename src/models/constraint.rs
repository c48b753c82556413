//! Timetabling constraint records.
//!
//! Constraints are descriptive metadata attached to a request. The
//! auditor runs a fixed battery of named checks and does not interpret
//! these records; they are carried so callers can persist and display
//! the rules a timetable was generated under.

use serde::{Deserialize, Serialize};

/// Whether breaching a constraint fails a timetable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Breach is a violation.
    #[default]
    Hard,
    /// Breach is a warning.
    Soft,
}

/// A named scheduling rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Unique constraint identifier.
    pub id: String,
    /// Short name.
    #[serde(default)]
    pub name: String,
    /// Hard or soft.
    #[serde(default, rename = "constraint_type")]
    pub kind: ConstraintKind,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Importance, 1 (lowest) to 10 (highest).
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Rule-specific parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

fn default_priority() -> u8 {
    1
}

impl Constraint {
    /// Creates a hard constraint.
    pub fn hard(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ConstraintKind::Hard,
            description: String::new(),
            priority: default_priority(),
            parameters: None,
        }
    }

    /// Creates a soft constraint.
    pub fn soft(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: ConstraintKind::Soft,
            ..Self::hard(id, name)
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority, clamped to 1..=10.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 10);
        self
    }

    /// Sets rule parameters.
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}
