//! Teaching resources: faculty and classrooms.
//!
//! Both are read-only inputs to allocation. Faculty carry the subjects
//! they can teach and the slots they cannot; classrooms carry a seat
//! capacity and a room classification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{SlotId, TimeSlot};

fn default_max_hours() -> u32 {
    20
}

/// A faculty member who can be assigned to classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Owning department.
    #[serde(default)]
    pub department: String,
    /// Subject IDs this faculty member is qualified to teach.
    #[serde(default)]
    pub subjects_can_teach: BTreeSet<String>,
    /// Contractual weekly teaching limit (hours).
    #[serde(default = "default_max_hours")]
    pub max_hours_per_week: u32,
    /// Slots during which this faculty member cannot teach.
    #[serde(default)]
    pub unavailable_slots: BTreeSet<SlotId>,
}

impl Faculty {
    /// Creates a faculty member with no qualifications.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            subjects_can_teach: BTreeSet::new(),
            max_hours_per_week: default_max_hours(),
            unavailable_slots: BTreeSet::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds a subject this faculty member can teach.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects_can_teach.insert(subject_id.into());
        self
    }

    /// Sets the weekly hour limit.
    pub fn with_max_hours(mut self, hours: u32) -> Self {
        self.max_hours_per_week = hours;
        self
    }

    /// Marks a slot as unavailable.
    pub fn with_unavailable(mut self, slot: &TimeSlot) -> Self {
        self.unavailable_slots.insert(slot.id());
        self
    }

    /// Whether this faculty member is qualified for a subject.
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.subjects_can_teach.contains(subject_id)
    }

    /// Whether the slot is listed as unavailable.
    pub fn is_unavailable(&self, slot_id: &SlotId) -> bool {
        self.unavailable_slots.contains(slot_id)
    }
}

/// Room classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// General lecture hall.
    #[default]
    LectureHall,
    /// Laboratory with equipment.
    Lab,
    /// Small seminar or tutorial room.
    SeminarRoom,
    /// Institution-specific type.
    Custom(String),
}

/// A classroom that can host a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seat count.
    pub capacity: u32,
    /// Room classification.
    #[serde(default)]
    pub room_type: RoomType,
}

impl Classroom {
    /// Creates a lecture hall with the given capacity.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            room_type: RoomType::LectureHall,
        }
    }

    /// Creates a lab with the given capacity.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity).with_room_type(RoomType::Lab)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type.
    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    /// Whether the room seats `num_students`.
    #[inline]
    pub fn fits(&self, num_students: u32) -> bool {
        self.capacity >= num_students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_builder() {
        let slot = TimeSlot::new("Monday", "09:00", "10:00");
        let f = Faculty::new("F1")
            .with_name("Dr. Rao")
            .with_department("Physics")
            .with_subject("PHYS")
            .with_max_hours(16)
            .with_unavailable(&slot);

        assert_eq!(f.id, "F1");
        assert_eq!(f.department, "Physics");
        assert!(f.can_teach("PHYS"));
        assert!(!f.can_teach("MATH"));
        assert_eq!(f.max_hours_per_week, 16);
        assert!(f.is_unavailable(&slot.id()));
    }

    #[test]
    fn test_faculty_deserialize_defaults() {
        let f: Faculty = serde_json::from_str(r#"{"id": "F9", "subjects_can_teach": ["MATH"]}"#)
            .unwrap();
        assert_eq!(f.max_hours_per_week, 20);
        assert!(f.unavailable_slots.is_empty());
        assert!(f.can_teach("MATH"));
    }

    #[test]
    fn test_classroom_fits() {
        let room = Classroom::new("R1", 40).with_name("Room 101");
        assert!(room.fits(40));
        assert!(room.fits(12));
        assert!(!room.fits(41));
        assert_eq!(room.room_type, RoomType::LectureHall);
        assert_eq!(Classroom::lab("L1", 30).room_type, RoomType::Lab);
    }

    #[test]
    fn test_room_type_serde() {
        let room: Classroom =
            serde_json::from_str(r#"{"id": "S1", "capacity": 20, "room_type": "seminar_room"}"#)
                .unwrap();
        assert_eq!(room.room_type, RoomType::SeminarRoom);
    }
}
