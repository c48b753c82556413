//! Weekly slot grid.
//!
//! Produces the ordered universe of schedulable slots. Order is day-major,
//! then time-ascending; the allocator walks slots in this order, so the
//! earliest day and earliest time win ties.

use std::collections::HashSet;

use crate::config::GridConfig;
use crate::error::{Result, TimetableError};
use crate::models::TimeSlot;

/// An immutable, ordered set of time slots.
///
/// # Example
///
/// ```
/// use u_timetable::scheduler::SlotGrid;
///
/// let grid = SlotGrid::standard_week();
/// assert_eq!(grid.len(), 35);
/// assert_eq!(grid.slots()[0].id().as_str(), "Monday|09:00|10:00");
/// assert_eq!(grid.slots()[3].start_time(), "13:00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    slots: Vec<TimeSlot>,
}

impl SlotGrid {
    /// Monday–Friday, seven one-hour windows between 09:00 and 17:00,
    /// with 12:00–13:00 left free.
    pub fn standard_week() -> Self {
        let config = GridConfig::default();
        Self {
            slots: expand(&config),
        }
    }

    /// Builds a grid from configuration.
    ///
    /// # Errors
    /// `TimetableError::Config` if there are no days or windows, a time is
    /// not `HH:MM`, a window does not end after it starts, or the same
    /// slot would be produced twice.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        if config.days.is_empty() {
            return Err(TimetableError::Config("slot grid has no days".into()));
        }
        if config.windows.is_empty() {
            return Err(TimetableError::Config("slot grid has no windows".into()));
        }
        if let Some(day) = config.days.iter().find(|d| d.trim().is_empty()) {
            return Err(TimetableError::Config(format!("invalid day name '{day}'")));
        }

        for w in &config.windows {
            let start = parse_hhmm(&w.start)?;
            let end = parse_hhmm(&w.end)?;
            if start >= end {
                return Err(TimetableError::Config(format!(
                    "window {}-{} does not end after it starts",
                    w.start, w.end
                )));
            }
        }

        let slots = expand(config);
        let mut seen = HashSet::new();
        for slot in &slots {
            if !seen.insert(slot.id()) {
                return Err(TimetableError::Config(format!("duplicate slot {}", slot.id())));
            }
        }

        Ok(Self { slots })
    }

    /// Slots in allocation order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Iterates slots in allocation order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimeSlot> {
        self.slots.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::standard_week()
    }
}

impl<'a> IntoIterator for &'a SlotGrid {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

fn expand(config: &GridConfig) -> Vec<TimeSlot> {
    config
        .days
        .iter()
        .flat_map(|day| {
            config
                .windows
                .iter()
                .map(move |w| TimeSlot::new(day.as_str(), w.start.as_str(), w.end.as_str()))
        })
        .collect()
}

/// Parses zero-padded `HH:MM` into minutes after midnight.
fn parse_hhmm(s: &str) -> Result<u32> {
    let invalid = || TimetableError::Config(format!("invalid time '{s}', expected HH:MM"));

    let (h, m) = s.split_once(':').ok_or_else(invalid)?;
    if h.len() != 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}
