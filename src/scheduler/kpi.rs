//! Allocation quality metrics (KPIs).
//!
//! Computes how far an allocation falls short of the requested weekly
//! quotas and how heavily it uses faculty and rooms.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Expected entries | Σ hours_per_week over every section's subjects |
//! | Scheduled entries | Entries actually allocated |
//! | Fill rate | scheduled / expected (1.0 when nothing was requested) |
//! | Shortfalls | (section, subject) pairs below quota |
//! | Faculty hours | Entries per faculty member |
//! | Room utilization | Booked slots / grid slots, per classroom |

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Allocation, AllocationRequest, SlotGrid};

/// A `(section, subject)` pair that did not reach its weekly quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub section_id: String,
    pub subject_id: String,
    /// Weekly quota.
    pub required: u32,
    /// Entries allocated.
    pub scheduled: u32,
}

impl Shortfall {
    /// Missing classes.
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.scheduled)
    }
}

/// Allocation performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationKpi {
    pub expected_entries: usize,
    pub scheduled_entries: usize,
    /// Fraction of requested classes allocated (0.0..1.0).
    pub fill_rate: f64,
    /// Pairs below quota, in request order.
    pub shortfalls: Vec<Shortfall>,
    /// Allocated hours per faculty ID.
    pub faculty_hours: BTreeMap<String, u32>,
    /// Booked fraction of the grid per classroom ID (rooms with bookings only).
    pub room_utilization: BTreeMap<String, f64>,
}

impl AllocationKpi {
    /// Computes KPIs for an allocation of `request` on `grid`.
    pub fn calculate(allocation: &Allocation, request: &AllocationRequest, grid: &SlotGrid) -> Self {
        let mut counts: BTreeMap<(&str, &str), u32> = BTreeMap::new();
        let mut faculty_hours: BTreeMap<String, u32> = BTreeMap::new();
        let mut room_slots: BTreeMap<String, u32> = BTreeMap::new();

        for e in &allocation.entries {
            *counts
                .entry((e.section.id.as_str(), e.subject.id.as_str()))
                .or_insert(0) += 1;
            *faculty_hours.entry(e.faculty.id.clone()).or_insert(0) += 1;
            *room_slots.entry(e.classroom.id.clone()).or_insert(0) += 1;
        }

        let mut shortfalls = Vec::new();
        for section in &request.sections {
            for subject in request.subjects_for(section) {
                let scheduled = counts
                    .get(&(section.id.as_str(), subject.id.as_str()))
                    .copied()
                    .unwrap_or(0);
                if scheduled < subject.hours_per_week {
                    shortfalls.push(Shortfall {
                        section_id: section.id.clone(),
                        subject_id: subject.id.clone(),
                        required: subject.hours_per_week,
                        scheduled,
                    });
                }
            }
        }

        let expected = request.expected_entries();
        let scheduled = allocation.total_entries();
        let fill_rate = if expected == 0 {
            1.0
        } else {
            scheduled as f64 / expected as f64
        };

        let room_utilization = if grid.is_empty() {
            BTreeMap::new()
        } else {
            room_slots
                .into_iter()
                .map(|(id, n)| (id, n as f64 / grid.len() as f64))
                .collect()
        };

        Self {
            expected_entries: expected,
            scheduled_entries: scheduled,
            fill_rate,
            shortfalls,
            faculty_hours,
            room_utilization,
        }
    }

    /// Total missing classes across all shortfalls.
    pub fn missing_entries(&self) -> u32 {
        self.shortfalls.iter().map(Shortfall::missing).sum()
    }

    /// Whether every quota was met.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}
