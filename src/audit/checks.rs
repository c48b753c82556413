//! The individual audit checks.
//!
//! Every check reads the same entry list and builds its own local index;
//! none depends on another, so they can run in any order or in parallel.

use std::collections::HashMap;

use super::AvailabilityIndex;
use crate::models::{EntryRecord, SlotId, Violation};

type IdOf = fn(&EntryRecord) -> Option<&str>;
type Report = fn(&str, &SlotId) -> Violation;

/// Reports every repeat booking of one resource in one slot.
///
/// For `n` entries sharing `(id, slot)`, the k-th one (0-based) yields `k`
/// findings, one per earlier entry it clashes with. Entries without the
/// resource id or a complete slot are skipped.
fn double_bookings(entries: &[EntryRecord], id_of: IdOf, report: Report) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut seen: HashMap<(&str, SlotId), usize> = HashMap::new();

    for entry in entries {
        let (Some(id), Some(slot)) = (id_of(entry), entry.slot_id()) else {
            continue;
        };
        let earlier = seen.entry((id, slot.clone())).or_insert(0);
        for _ in 0..*earlier {
            out.push(report(id, &slot));
        }
        *earlier += 1;
    }

    out
}

fn faculty_of(e: &EntryRecord) -> Option<&str> {
    e.faculty_id.as_deref()
}

fn classroom_of(e: &EntryRecord) -> Option<&str> {
    e.classroom_id.as_deref()
}

fn section_of(e: &EntryRecord) -> Option<&str> {
    e.section_id.as_deref()
}

pub(crate) fn faculty_conflicts(entries: &[EntryRecord]) -> Vec<Violation> {
    double_bookings(entries, faculty_of, Violation::faculty_conflict)
}

pub(crate) fn classroom_conflicts(entries: &[EntryRecord]) -> Vec<Violation> {
    double_bookings(entries, classroom_of, Violation::classroom_conflict)
}

pub(crate) fn section_conflicts(entries: &[EntryRecord]) -> Vec<Violation> {
    double_bookings(entries, section_of, Violation::section_conflict)
}

/// Entries placed in a slot their faculty member marked unavailable.
/// No-op for an empty index.
pub(crate) fn faculty_availability(
    entries: &[EntryRecord],
    availability: &AvailabilityIndex,
) -> Vec<Violation> {
    if availability.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter_map(|e| {
            let faculty_id = e.faculty_id.as_deref()?;
            let slot = e.slot_id()?;
            availability
                .is_unavailable(faculty_id, &slot)
                .then(|| Violation::faculty_unavailable(faculty_id, &slot))
        })
        .collect()
}

/// Sections larger than their room. A missing capacity never fails.
pub(crate) fn classroom_capacity(entries: &[EntryRecord]) -> Vec<Violation> {
    entries
        .iter()
        .filter_map(|e| {
            let capacity = e.classroom_capacity?;
            let size = e.section_size.unwrap_or(0);
            (size > capacity).then(|| {
                Violation::capacity_exceeded(e.section_id.as_deref().unwrap_or(""), size, capacity)
            })
        })
        .collect()
}

/// Faculty whose entry count exceeds `limit`. Each entry is one hour.
/// Warnings follow first appearance of the faculty id.
pub(crate) fn workload_balance(entries: &[EntryRecord], limit: u32) -> Vec<Violation> {
    let mut order: Vec<(&str, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for faculty_id in entries.iter().filter_map(|e| e.faculty_id.as_deref()) {
        match index.get(faculty_id) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(faculty_id, order.len());
                order.push((faculty_id, 1));
            }
        }
    }

    order
        .into_iter()
        .filter(|&(_, hours)| hours > limit)
        .map(|(id, hours)| Violation::workload_exceeded(id, hours, limit))
        .collect()
}
