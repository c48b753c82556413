//! Greedy first-fit timetable allocator.
//!
//! # Algorithm
//!
//! 1. Walk sections in input order, and for each one the subject catalogue
//!    in input order, keeping the subjects the section takes.
//! 2. For each subject, walk the slot grid (day-major, time-ascending).
//! 3. Skip slots where the section is already busy.
//! 4. Take the first qualified faculty member (input order) free at the slot.
//! 5. Take the smallest classroom (stable on input order) that seats the
//!    section and is free at the slot.
//! 6. Commit the entry and mark all three resources busy at the slot.
//! 7. Stop once the subject's weekly quota is met.
//!
//! Single pass, no backtracking: a slot rejected for one subject is never
//! revisited with a different resource combination. Subjects that cannot
//! be placed are under-scheduled, never over-scheduled.
//!
//! # Complexity
//! O(S · J · T · (F + C)) where S=sections, J=subjects/section, T=slots,
//! F=faculty, C=classrooms.
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling", Sec. 3 (constructive heuristics)

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::SlotGrid;
use crate::error::Result;
use crate::models::{Classroom, Constraint, Faculty, ScheduleEntry, Section, SlotId, Subject};

/// Input container for allocation.
#[derive(Debug, Clone, Default)]
pub struct AllocationRequest {
    /// Sections to timetable, in priority order.
    pub sections: Vec<Section>,
    /// Subject catalogue.
    pub subjects: Vec<Subject>,
    /// Available faculty, in preference order.
    pub faculty: Vec<Faculty>,
    /// Available classrooms.
    pub classrooms: Vec<Classroom>,
    /// Rules the timetable is generated under (informational).
    pub constraints: Vec<Constraint>,
}

impl AllocationRequest {
    /// Creates a request.
    pub fn new(
        sections: Vec<Section>,
        subjects: Vec<Subject>,
        faculty: Vec<Faculty>,
        classrooms: Vec<Classroom>,
    ) -> Self {
        Self {
            sections,
            subjects,
            faculty,
            classrooms,
            constraints: Vec::new(),
        }
    }

    /// Attaches constraint records.
    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Resolved subjects for a section: catalogue entries the section
    /// takes, in catalogue order, first occurrence of each ID.
    pub fn subjects_for<'a>(&'a self, section: &Section) -> Vec<&'a Subject> {
        let mut seen = HashSet::new();
        self.subjects
            .iter()
            .filter(|s| section.takes(&s.id) && seen.insert(s.id.as_str()))
            .collect()
    }

    /// Theoretical entry count: Σ `hours_per_week` over every section's
    /// resolved subjects.
    pub fn expected_entries(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|sec| self.subjects_for(sec))
            .map(|s| s.hours_per_week as usize)
            .sum()
    }
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    /// Allocated entries, in allocation order.
    pub entries: Vec<ScheduleEntry>,
    /// Number of sections processed.
    pub sections_scheduled: usize,
    /// Entries that would exist if every quota were met.
    pub expected_entries: usize,
}

impl Allocation {
    /// Number of allocated entries.
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Whether every subject quota was met.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.expected_entries
    }

    /// Entries for one `(section, subject)` pair.
    pub fn entries_for(&self, section_id: &str, subject_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.section.id == section_id && e.subject.id == subject_id)
            .collect()
    }

    /// Converts into the result payload:
    /// `schedule_entries`, `total_entries`, `sections_scheduled`, `expected_entries`.
    pub fn into_data(self) -> Result<Map<String, Value>> {
        let mut data = Map::new();
        data.insert("total_entries".into(), Value::from(self.entries.len()));
        data.insert("sections_scheduled".into(), Value::from(self.sections_scheduled));
        data.insert("expected_entries".into(), Value::from(self.expected_entries));
        data.insert("schedule_entries".into(), serde_json::to_value(self.entries)?);
        Ok(data)
    }
}

/// An assignment policy behind the allocator contract.
///
/// Implementations must never produce two entries sharing a
/// `(faculty, slot)`, `(classroom, slot)` or `(section, slot)` pair, and
/// never exceed a subject's weekly quota for a section.
pub trait AllocationStrategy: Send + Sync {
    /// Allocates the request onto the grid.
    fn allocate(&self, request: &AllocationRequest, grid: &SlotGrid) -> Result<Allocation>;
}

/// Run-scoped map from a resource ID to the slots it is committed to.
#[derive(Debug, Default)]
struct OccupancyMap<'a> {
    busy: HashMap<&'a str, HashSet<SlotId>>,
}

impl<'a> OccupancyMap<'a> {
    fn is_busy(&self, id: &str, slot: &SlotId) -> bool {
        self.busy.get(id).is_some_and(|slots| slots.contains(slot))
    }

    fn occupy(&mut self, id: &'a str, slot: SlotId) {
        self.busy.entry(id).or_default().insert(slot);
    }
}

/// Deterministic greedy first-fit allocator.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Classroom, Faculty, Section, Subject};
/// use u_timetable::scheduler::{AllocationRequest, AllocationStrategy, GreedyAllocator, SlotGrid};
///
/// let request = AllocationRequest::new(
///     vec![Section::new("S1", 30).with_subject("MATH")],
///     vec![Subject::new("MATH", 3)],
///     vec![Faculty::new("F1").with_subject("MATH")],
///     vec![Classroom::new("R1", 40)],
/// );
/// let allocation = GreedyAllocator::new()
///     .allocate(&request, &SlotGrid::standard_week())
///     .unwrap();
/// assert_eq!(allocation.total_entries(), 3);
/// assert_eq!(allocation.entries[0].slot.id().as_str(), "Monday|09:00|10:00");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    /// Creates the allocator.
    pub fn new() -> Self {
        Self
    }
}

impl AllocationStrategy for GreedyAllocator {
    fn allocate(&self, request: &AllocationRequest, grid: &SlotGrid) -> Result<Allocation> {
        info!(
            event = "allocation_start",
            sections = request.sections.len(),
            subjects = request.subjects.len(),
            faculty = request.faculty.len(),
            classrooms = request.classrooms.len(),
            slots = grid.len(),
        );

        for (section_id, subject_id) in crate::validation::unknown_subject_refs(
            &request.sections,
            &request.subjects,
        ) {
            warn!(section = section_id, subject = subject_id, "section references unknown subject");
        }

        // Smallest room that fits wins; equal capacities keep input order.
        let mut rooms: Vec<&Classroom> = request.classrooms.iter().collect();
        rooms.sort_by_key(|r| r.capacity);

        let mut faculty_busy = OccupancyMap::default();
        let mut room_busy = OccupancyMap::default();
        let mut section_busy = OccupancyMap::default();
        let mut entries = Vec::new();

        for section in &request.sections {
            for subject in request.subjects_for(section) {
                let target = subject.hours_per_week;
                let mut scheduled = 0u32;

                for slot in grid {
                    if scheduled >= target {
                        break;
                    }
                    let slot_id = slot.id();

                    if section_busy.is_busy(&section.id, &slot_id) {
                        continue;
                    }

                    let Some(teacher) = request
                        .faculty
                        .iter()
                        .find(|f| f.can_teach(&subject.id) && !faculty_busy.is_busy(&f.id, &slot_id))
                    else {
                        continue;
                    };

                    let Some(room) = rooms
                        .iter()
                        .copied()
                        .find(|r| r.fits(section.num_students) && !room_busy.is_busy(&r.id, &slot_id))
                    else {
                        continue;
                    };

                    entries.push(ScheduleEntry::new(
                        slot.clone(),
                        subject.clone(),
                        teacher.clone(),
                        room.clone(),
                        section.clone(),
                    ));
                    faculty_busy.occupy(&teacher.id, slot_id.clone());
                    room_busy.occupy(&room.id, slot_id.clone());
                    section_busy.occupy(&section.id, slot_id);
                    scheduled += 1;
                }

                if scheduled < target {
                    debug!(
                        section = %section.id,
                        subject = %subject.id,
                        required = target,
                        scheduled,
                        "subject under-scheduled",
                    );
                }
            }
        }

        let allocation = Allocation {
            entries,
            sections_scheduled: request.sections.len(),
            expected_entries: request.expected_entries(),
        };

        info!(
            event = "allocation_end",
            total_entries = allocation.total_entries(),
            expected_entries = allocation.expected_entries,
        );

        Ok(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn two_subject_request() -> AllocationRequest {
        AllocationRequest::new(
            vec![Section::new("S1", 30)
                .with_subject("MATH")
                .with_subject("PHYS")],
            vec![Subject::new("MATH", 2), Subject::new("PHYS", 2)],
            vec![
                Faculty::new("F1").with_subject("MATH"),
                Faculty::new("F2").with_subject("PHYS"),
            ],
            vec![Classroom::new("R1", 40)],
        )
    }

    fn allocate(request: &AllocationRequest) -> Allocation {
        GreedyAllocator::new()
            .allocate(request, &SlotGrid::standard_week())
            .unwrap()
    }

    fn assert_no_double_booking(allocation: &Allocation) {
        let mut faculty = HashSet::new();
        let mut rooms = HashSet::new();
        let mut sections = HashSet::new();
        for e in &allocation.entries {
            assert!(faculty.insert((e.faculty.id.clone(), e.slot_id())));
            assert!(rooms.insert((e.classroom.id.clone(), e.slot_id())));
            assert!(sections.insert((e.section.id.clone(), e.slot_id())));
        }
    }

    #[test]
    fn test_two_subjects_one_room() {
        let allocation = allocate(&two_subject_request());

        assert_eq!(allocation.total_entries(), 4);
        assert_eq!(allocation.entries_for("S1", "MATH").len(), 2);
        assert_eq!(allocation.entries_for("S1", "PHYS").len(), 2);
        assert!(allocation.is_complete());
        assert_no_double_booking(&allocation);

        // MATH takes the first two slots, PHYS the next two.
        let starts: Vec<String> = allocation
            .entries
            .iter()
            .map(|e| e.slot.start_time().to_string())
            .collect();
        assert_eq!(starts, vec!["09:00", "10:00", "11:00", "13:00"]);
        assert_eq!(allocation.entries[2].faculty.id, "F2");
    }

    #[test]
    fn test_subjects_follow_catalogue_order() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 30)
                .with_subject("MATH")
                .with_subject("PHYS")],
            vec![Subject::new("PHYS", 1), Subject::new("MATH", 1)],
            vec![Faculty::new("F1").with_subject("MATH").with_subject("PHYS")],
            vec![Classroom::new("R1", 40)],
        );
        let allocation = allocate(&request);
        let order: Vec<(&str, &str)> = allocation
            .entries
            .iter()
            .map(|e| (e.subject.id.as_str(), e.slot.start_time()))
            .collect();
        assert_eq!(order, vec![("PHYS", "09:00"), ("MATH", "10:00")]);
    }

    #[test]
    fn test_first_qualified_faculty_wins() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 10).with_subject("MATH")],
            vec![Subject::new("MATH", 2)],
            vec![
                Faculty::new("F0").with_subject("CHEM"),
                Faculty::new("F1").with_subject("MATH"),
                Faculty::new("F2").with_subject("MATH"),
            ],
            vec![Classroom::new("R1", 40)],
        );
        let allocation = allocate(&request);
        assert!(allocation.entries.iter().all(|e| e.faculty.id == "F1"));
    }

    #[test]
    fn test_smallest_fitting_room_stable_order() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 30).with_subject("MATH")],
            vec![Subject::new("MATH", 1)],
            vec![Faculty::new("F1").with_subject("MATH")],
            vec![
                Classroom::new("BIG", 200),
                Classroom::new("SMALL", 20),
                Classroom::new("MID-A", 35),
                Classroom::new("MID-B", 35),
            ],
        );
        let allocation = allocate(&request);
        assert_eq!(allocation.entries[0].classroom.id, "MID-A");
    }

    #[test]
    fn test_sections_share_faculty_without_clash() {
        let request = AllocationRequest::new(
            vec![
                Section::new("A", 30).with_subject("MATH"),
                Section::new("B", 30).with_subject("MATH"),
            ],
            vec![Subject::new("MATH", 3)],
            vec![Faculty::new("F1").with_subject("MATH")],
            vec![Classroom::new("R1", 40), Classroom::new("R2", 40)],
        );
        let allocation = allocate(&request);
        assert_eq!(allocation.total_entries(), 6);
        assert_no_double_booking(&allocation);

        // Section B starts where the only teacher becomes free.
        let b_first = allocation.entries_for("B", "MATH")[0];
        assert_eq!(b_first.slot.id().as_str(), "Monday|13:00|14:00");
    }

    #[test]
    fn test_no_qualified_faculty_under_schedules() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 30).with_subject("MATH")],
            vec![Subject::new("MATH", 3)],
            vec![Faculty::new("F1").with_subject("PHYS")],
            vec![Classroom::new("R1", 40)],
        );
        let allocation = allocate(&request);
        assert_eq!(allocation.total_entries(), 0);
        assert_eq!(allocation.expected_entries, 3);
        assert!(!allocation.is_complete());
    }

    #[test]
    fn test_room_too_small_under_schedules() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 80).with_subject("MATH")],
            vec![Subject::new("MATH", 2)],
            vec![Faculty::new("F1").with_subject("MATH")],
            vec![Classroom::new("R1", 40)],
        );
        assert_eq!(allocate(&request).total_entries(), 0);
    }

    #[test]
    fn test_quota_larger_than_grid_is_capped() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 30).with_subject("MATH")],
            vec![Subject::new("MATH", 50)],
            vec![Faculty::new("F1").with_subject("MATH")],
            vec![Classroom::new("R1", 40)],
        );
        let allocation = allocate(&request);
        assert_eq!(allocation.total_entries(), 35);
        assert_eq!(allocation.expected_entries, 50);
    }

    #[test]
    fn test_unknown_and_repeated_subjects() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 30)
                .with_subject("MATH")
                .with_subject("ART")
                .with_subject("MATH")],
            vec![Subject::new("MATH", 2)],
            vec![Faculty::new("F1").with_subject("MATH")],
            vec![Classroom::new("R1", 40)],
        );
        let allocation = allocate(&request);
        assert_eq!(allocation.entries_for("S1", "MATH").len(), 2);
        assert_eq!(allocation.expected_entries, 2);
    }

    #[test]
    fn test_zero_hour_subject() {
        let request = AllocationRequest::new(
            vec![Section::new("S1", 30).with_subject("SEM")],
            vec![Subject::new("SEM", 0)],
            vec![Faculty::new("F1").with_subject("SEM")],
            vec![Classroom::new("R1", 40)],
        );
        let allocation = allocate(&request);
        assert_eq!(allocation.total_entries(), 0);
        assert!(allocation.is_complete());
    }

    #[test]
    fn test_empty_request() {
        let allocation = allocate(&AllocationRequest::default());
        assert_eq!(allocation.total_entries(), 0);
        assert_eq!(allocation.sections_scheduled, 0);
    }

    #[test]
    fn test_into_data_shape() {
        let data = allocate(&two_subject_request()).into_data().unwrap();
        assert_eq!(data["total_entries"], 4);
        assert_eq!(data["sections_scheduled"], 1);
        assert_eq!(data["expected_entries"], 4);
        let entries = data["schedule_entries"].as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["faculty"]["id"], "F1");
        assert_eq!(entries[0]["slot"]["day"], "Monday");
    }

    #[test]
    fn test_deterministic() {
        let request = two_subject_request();
        assert_eq!(allocate(&request), allocate(&request));
    }
}
