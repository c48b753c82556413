//! Allocator and auditor properties over generated inputs.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use u_timetable::audit::ConstraintValidator;
use u_timetable::models::{Classroom, Faculty, Section, SlotId, Subject};
use u_timetable::scheduler::{AllocationRequest, AllocationStrategy, GreedyAllocator, SlotGrid};

fn end_to_end_request() -> AllocationRequest {
    AllocationRequest::new(
        vec![Section::new("S1", 30).with_subjects(vec!["MATH".into(), "PHYS".into()])],
        vec![Subject::new("MATH", 2), Subject::new("PHYS", 2)],
        vec![
            Faculty::new("F1").with_subject("MATH"),
            Faculty::new("F2").with_subject("PHYS"),
        ],
        vec![Classroom::new("R1", 40)],
    )
}

#[test]
fn end_to_end_math_phys() {
    let allocation = GreedyAllocator::new()
        .allocate(&end_to_end_request(), &SlotGrid::standard_week())
        .unwrap();

    assert_eq!(allocation.total_entries(), 4);
    assert_eq!(allocation.entries_for("S1", "MATH").len(), 2);
    assert_eq!(allocation.entries_for("S1", "PHYS").len(), 2);

    let slots: HashSet<SlotId> = allocation.entries.iter().map(|e| e.slot_id()).collect();
    assert_eq!(slots.len(), 4);

    let report = ConstraintValidator::new().audit_schedule(&allocation.entries);
    assert!(report.violations.is_empty());
}

fn arb_request() -> impl Strategy<Value = AllocationRequest> {
    let subjects = prop::collection::vec((1u32..6, any::<bool>()), 1..5);
    let sections = prop::collection::vec((1u32..80, prop::collection::vec(0usize..5, 0..5)), 1..5);
    let faculty = prop::collection::vec(prop::collection::vec(0usize..5, 0..4), 0..5);
    let rooms = prop::collection::vec(1u32..100, 0..4);

    (subjects, sections, faculty, rooms).prop_map(|(subjects, sections, faculty, rooms)| {
        let subjects: Vec<Subject> = subjects
            .into_iter()
            .enumerate()
            .map(|(i, (hours, lab))| {
                let subject = Subject::new(format!("SUB{i}"), hours);
                if lab {
                    subject.with_lab()
                } else {
                    subject
                }
            })
            .collect();

        // Indices past the subject list become unknown references.
        let sections = sections
            .into_iter()
            .enumerate()
            .map(|(i, (size, picks))| {
                let ids = picks.into_iter().map(|p| format!("SUB{p}")).collect();
                Section::new(format!("S{i}"), size).with_subjects(ids)
            })
            .collect();

        let faculty = faculty
            .into_iter()
            .enumerate()
            .map(|(i, picks)| {
                picks
                    .into_iter()
                    .fold(Faculty::new(format!("F{i}")), |f, p| f.with_subject(format!("SUB{p}")))
            })
            .collect();

        let classrooms = rooms
            .into_iter()
            .enumerate()
            .map(|(i, cap)| Classroom::new(format!("R{i}"), cap))
            .collect();

        AllocationRequest::new(sections, subjects, faculty, classrooms)
    })
}

proptest! {
    #[test]
    fn allocation_respects_quotas_and_exclusivity(request in arb_request()) {
        let allocation = GreedyAllocator::new()
            .allocate(&request, &SlotGrid::standard_week())
            .unwrap();

        let mut per_pair: HashMap<(String, String), u32> = HashMap::new();
        let mut faculty_slots = HashSet::new();
        let mut room_slots = HashSet::new();
        let mut section_slots = HashSet::new();

        for entry in &allocation.entries {
            let slot = entry.slot_id();
            prop_assert!(faculty_slots.insert((entry.faculty.id.clone(), slot.clone())));
            prop_assert!(room_slots.insert((entry.classroom.id.clone(), slot.clone())));
            prop_assert!(section_slots.insert((entry.section.id.clone(), slot)));
            prop_assert!(entry.faculty.can_teach(&entry.subject.id));
            prop_assert!(entry.classroom.capacity >= entry.section.num_students);

            *per_pair
                .entry((entry.section.id.clone(), entry.subject.id.clone()))
                .or_insert(0) += 1;
        }

        for ((_, subject_id), count) in &per_pair {
            let quota = request
                .subjects
                .iter()
                .find(|s| &s.id == subject_id)
                .map(|s| s.hours_per_week)
                .unwrap_or(0);
            prop_assert!(*count <= quota);
        }

        prop_assert!(allocation.total_entries() <= allocation.expected_entries);
    }

    #[test]
    fn allocator_output_audits_clean(request in arb_request()) {
        let allocation = GreedyAllocator::new()
            .allocate(&request, &SlotGrid::standard_week())
            .unwrap();
        let report = ConstraintValidator::new().audit_schedule(&allocation.entries);
        prop_assert!(report.violations.is_empty());
        prop_assert_eq!(report.total_entries, allocation.total_entries());
    }
}
