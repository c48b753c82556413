//! Time slot model.
//!
//! A time slot is one schedulable window on one day. Slots are identified
//! by a deterministic composite key, so two slots built from the same
//! `(day, start, end)` triple always compare equal.
//!
//! # Time Model
//! Days are named (`"Monday"`), times are `HH:MM` strings. The slot grid
//! is the only producer of slots in an allocation run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic slot key: `day|start_time|end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Separator between the key components.
    pub const SEPARATOR: char = '|';

    /// Builds the key from its three components.
    pub fn from_parts(day: &str, start_time: &str, end_time: &str) -> Self {
        let sep = Self::SEPARATOR;
        Self(format!("{day}{sep}{start_time}{sep}{end_time}"))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&TimeSlot> for SlotId {
    fn from(slot: &TimeSlot) -> Self {
        slot.id()
    }
}

/// A schedulable window `[start_time, end_time)` on a named day.
///
/// Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    day: String,
    start_time: String,
    end_time: String,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Day name.
    pub fn day(&self) -> &str {
        &self.day
    }

    /// Start time (`HH:MM`, inclusive).
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    /// End time (`HH:MM`, exclusive).
    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// The slot's composite key.
    pub fn id(&self) -> SlotId {
        SlotId::from_parts(&self.day, &self.start_time, &self.end_time)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start_time, self.end_time)
    }
}
