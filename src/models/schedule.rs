//! Schedule entry and violation models.
//!
//! A [`ScheduleEntry`] is the allocator's output unit: one class of one
//! subject for one section, pinned to a slot, a faculty member and a room.
//! An [`EntryRecord`] is the auditor's input unit: the same information
//! with every field optional, so records from any source can be checked.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 2 (class-teacher model)

use serde::{Deserialize, Serialize};

use super::{Classroom, Faculty, Section, SlotId, Subject, TimeSlot};
use crate::error::{Result, TimetableError};

/// One allocated class.
///
/// Entries are never mutated after allocation; checks index them only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// When the class takes place.
    pub slot: TimeSlot,
    /// What is taught.
    pub subject: Subject,
    /// Who teaches.
    pub faculty: Faculty,
    /// Where.
    pub classroom: Classroom,
    /// To whom.
    pub section: Section,
}

impl ScheduleEntry {
    /// Creates an entry.
    pub fn new(
        slot: TimeSlot,
        subject: Subject,
        faculty: Faculty,
        classroom: Classroom,
        section: Section,
    ) -> Self {
        Self {
            slot,
            subject,
            faculty,
            classroom,
            section,
        }
    }

    /// The slot key.
    #[inline]
    pub fn slot_id(&self) -> SlotId {
        self.slot.id()
    }
}

/// A schedule-entry-shaped record with optional fields.
///
/// Deserializes from either the flat shape
/// (`{"faculty_id": "F1", "day": "Monday", ...}`) or the nested shape
/// produced by serializing a [`ScheduleEntry`]
/// (`{"faculty": {"id": "F1"}, "slot": {"day": "Monday", ...}, ...}`).
/// Flat fields take precedence; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntryRecord")]
pub struct EntryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Seats in the classroom. `None` = unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_capacity: Option<u32>,
    /// Section headcount. `None` = 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_size: Option<u32>,
}

impl EntryRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot fields.
    pub fn at(
        mut self,
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        self.day = Some(day.into());
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }

    /// Sets the slot fields from a slot.
    pub fn at_slot(self, slot: &TimeSlot) -> Self {
        self.at(slot.day(), slot.start_time(), slot.end_time())
    }

    /// Sets the subject ID.
    pub fn with_subject(mut self, id: impl Into<String>) -> Self {
        self.subject_id = Some(id.into());
        self
    }

    /// Sets the faculty ID.
    pub fn with_faculty(mut self, id: impl Into<String>) -> Self {
        self.faculty_id = Some(id.into());
        self
    }

    /// Sets the classroom ID and its capacity.
    pub fn with_classroom(mut self, id: impl Into<String>, capacity: u32) -> Self {
        self.classroom_id = Some(id.into());
        self.classroom_capacity = Some(capacity);
        self
    }

    /// Sets the section ID and its size.
    pub fn with_section(mut self, id: impl Into<String>, num_students: u32) -> Self {
        self.section_id = Some(id.into());
        self.section_size = Some(num_students);
        self
    }

    /// The slot key, if all three slot fields are present.
    pub fn slot_id(&self) -> Option<SlotId> {
        match (&self.day, &self.start_time, &self.end_time) {
            (Some(day), Some(start), Some(end)) => Some(SlotId::from_parts(day, start, end)),
            _ => None,
        }
    }

    /// Parses a JSON array of records.
    ///
    /// Missing fields are tolerated; a value of the wrong type is not.
    pub fn parse_batch(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| TimetableError::MalformedRecord(e.to_string()))
    }
}

impl From<&ScheduleEntry> for EntryRecord {
    fn from(entry: &ScheduleEntry) -> Self {
        Self::new()
            .at_slot(&entry.slot)
            .with_subject(entry.subject.id.clone())
            .with_faculty(entry.faculty.id.clone())
            .with_classroom(entry.classroom.id.clone(), entry.classroom.capacity)
            .with_section(entry.section.id.clone(), entry.section.num_students)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSlot {
    day: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRef {
    id: Option<String>,
    capacity: Option<u32>,
    num_students: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntryRecord {
    day: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    slot: Option<RawSlot>,
    subject_id: Option<String>,
    faculty_id: Option<String>,
    classroom_id: Option<String>,
    section_id: Option<String>,
    classroom_capacity: Option<u32>,
    section_size: Option<u32>,
    subject: Option<RawRef>,
    faculty: Option<RawRef>,
    classroom: Option<RawRef>,
    section: Option<RawRef>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn pick(flat: Option<String>, nested: Option<String>) -> Option<String> {
    non_empty(flat).or_else(|| non_empty(nested))
}

impl From<RawEntryRecord> for EntryRecord {
    fn from(raw: RawEntryRecord) -> Self {
        let slot = raw.slot.unwrap_or_default();
        let subject = raw.subject.unwrap_or_default();
        let faculty = raw.faculty.unwrap_or_default();
        let classroom = raw.classroom.unwrap_or_default();
        let section = raw.section.unwrap_or_default();

        Self {
            day: pick(raw.day, slot.day),
            start_time: pick(raw.start_time, slot.start_time),
            end_time: pick(raw.end_time, slot.end_time),
            subject_id: pick(raw.subject_id, subject.id),
            faculty_id: pick(raw.faculty_id, faculty.id),
            classroom_id: pick(raw.classroom_id, classroom.id),
            section_id: pick(raw.section_id, section.id),
            classroom_capacity: raw.classroom_capacity.or(classroom.capacity),
            section_size: raw.section_size.or(section.num_students),
        }
    }
}

/// A detected hard violation or soft warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What was violated.
    pub kind: ViolationKind,
    /// Related entity ID (faculty, classroom, or section). Empty if unknown.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Faculty member booked twice in one slot.
    FacultyConflict,
    /// Classroom booked twice in one slot.
    ClassroomConflict,
    /// Section booked twice in one slot.
    SectionConflict,
    /// Faculty member booked in an unavailable slot.
    FacultyUnavailable,
    /// Section larger than its classroom.
    CapacityExceeded,
    /// Faculty weekly load above the recommended limit (soft).
    WorkloadExceeded,
    /// Poor spread of a subject across the week (soft).
    SubjectDistribution,
}

impl ViolationKind {
    /// Whether findings of this kind are warnings rather than violations.
    pub fn is_soft(self) -> bool {
        matches!(self, Self::WorkloadExceeded | Self::SubjectDistribution)
    }
}

impl Violation {
    /// Creates a finding.
    pub fn new(kind: ViolationKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Faculty member booked twice in one slot.
    pub fn faculty_conflict(faculty_id: &str, slot: &SlotId) -> Self {
        Self::new(
            ViolationKind::FacultyConflict,
            faculty_id,
            format!("Faculty conflict: {faculty_id} assigned to multiple classes at {slot}"),
        )
    }

    /// Classroom booked twice in one slot.
    pub fn classroom_conflict(classroom_id: &str, slot: &SlotId) -> Self {
        Self::new(
            ViolationKind::ClassroomConflict,
            classroom_id,
            format!("Classroom conflict: {classroom_id} double-booked at {slot}"),
        )
    }

    /// Section with two classes in one slot.
    pub fn section_conflict(section_id: &str, slot: &SlotId) -> Self {
        Self::new(
            ViolationKind::SectionConflict,
            section_id,
            format!("Section conflict: {section_id} has multiple classes at {slot}"),
        )
    }

    /// Faculty member teaching in a slot they marked unavailable.
    pub fn faculty_unavailable(faculty_id: &str, slot: &SlotId) -> Self {
        Self::new(
            ViolationKind::FacultyUnavailable,
            faculty_id,
            format!("Availability violation: {faculty_id} is unavailable at {slot}"),
        )
    }

    /// Section larger than its classroom.
    pub fn capacity_exceeded(section_id: &str, num_students: u32, capacity: u32) -> Self {
        Self::new(
            ViolationKind::CapacityExceeded,
            section_id,
            format!(
                "Capacity violation: Section with {num_students} students \
                 assigned to classroom with capacity {capacity}"
            ),
        )
    }

    /// Faculty member above the weekly workload threshold (soft).
    pub fn workload_exceeded(faculty_id: &str, hours: u32, limit: u32) -> Self {
        Self::new(
            ViolationKind::WorkloadExceeded,
            faculty_id,
            format!("Workload warning: Faculty {faculty_id} has {hours} hours (max recommended: {limit})"),
        )
    }
}
