//! Constraint auditing for proposed timetables.
//!
//! Audits any list of entry records, whether produced by the allocator,
//! uploaded, or hand-written, against a fixed battery of checks:
//!
//! | Check | Severity |
//! |-------|----------|
//! | Faculty double-booking | hard |
//! | Classroom double-booking | hard |
//! | Section double-booking | hard |
//! | Faculty availability | hard (no-op without availability data) |
//! | Classroom capacity | hard |
//! | Workload balance | soft |
//! | Subject distribution | soft (pluggable, no-op by default) |
//!
//! Findings are concatenated in the table's order, so reports are
//! reproducible regardless of whether checks run sequentially or on the
//! rayon pool (`parallel` feature).

mod checks;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::config::AuditConfig;
use crate::models::{EntryRecord, Faculty, ScheduleEntry, SlotId, Violation};

/// Faculty ID → slots the faculty member cannot teach in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    unavailable: HashMap<String, HashSet<SlotId>>,
}

impl AvailabilityIndex {
    /// Creates an empty index (availability check becomes a no-op).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from faculty records.
    pub fn from_faculty(faculty: &[Faculty]) -> Self {
        let unavailable = faculty
            .iter()
            .filter(|f| !f.unavailable_slots.is_empty())
            .map(|f| (f.id.clone(), f.unavailable_slots.iter().cloned().collect()))
            .collect();
        Self { unavailable }
    }

    /// Adds one unavailable slot.
    pub fn with_unavailable(mut self, faculty_id: impl Into<String>, slot: SlotId) -> Self {
        self.unavailable
            .entry(faculty_id.into())
            .or_default()
            .insert(slot);
        self
    }

    /// Whether the faculty member is unavailable at the slot.
    pub fn is_unavailable(&self, faculty_id: &str, slot: &SlotId) -> bool {
        self.unavailable
            .get(faculty_id)
            .is_some_and(|slots| slots.contains(slot))
    }

    /// Whether no unavailability is recorded.
    pub fn is_empty(&self) -> bool {
        self.unavailable.values().all(HashSet::is_empty)
    }
}

/// Soft check on how a subject is spread over the week.
///
/// Implementations return warnings of kind
/// [`ViolationKind::SubjectDistribution`](crate::models::ViolationKind).
pub trait DistributionPolicy: Send + Sync {
    /// Inspects the entries and returns warnings.
    fn check(&self, entries: &[EntryRecord]) -> Vec<Violation>;
}

/// Default policy: no distribution warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDistributionPolicy;

impl DistributionPolicy for NoDistributionPolicy {
    fn check(&self, _entries: &[EntryRecord]) -> Vec<Violation> {
        Vec::new()
    }
}

/// Outcome of an audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Hard findings.
    pub violations: Vec<Violation>,
    /// Soft findings.
    pub warnings: Vec<Violation>,
    /// Entries audited.
    pub total_entries: usize,
    /// `total_entries - violations`. Approximate: one entry can cause
    /// several violations, so this can go negative.
    pub valid_entries: i64,
}

impl AuditReport {
    /// Whether no hard constraint was violated.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in report order.
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    /// Warning messages in report order.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|v| v.message.clone()).collect()
    }

    /// Converts into the result payload:
    /// `violations`, `warnings` (message strings), `total_entries`, `valid_entries`.
    pub fn to_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("violations".into(), Value::from(self.violation_messages()));
        data.insert("warnings".into(), Value::from(self.warning_messages()));
        data.insert("total_entries".into(), Value::from(self.total_entries));
        data.insert("valid_entries".into(), Value::from(self.valid_entries));
        data
    }
}

/// Audits timetables against hard and soft constraints.
///
/// # Example
///
/// ```
/// use u_timetable::audit::ConstraintValidator;
/// use u_timetable::models::EntryRecord;
///
/// let entries = vec![
///     EntryRecord::new().at("Monday", "09:00", "10:00").with_faculty("F1"),
///     EntryRecord::new().at("Monday", "09:00", "10:00").with_faculty("F1"),
/// ];
/// let report = ConstraintValidator::new().audit(&entries);
/// assert!(!report.is_valid());
/// assert!(report.violations[0].message.contains("F1"));
/// ```
#[derive(Clone)]
pub struct ConstraintValidator {
    config: AuditConfig,
    availability: AvailabilityIndex,
    distribution: Arc<dyn DistributionPolicy>,
}

impl fmt::Debug for ConstraintValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintValidator")
            .field("config", &self.config)
            .field("availability", &self.availability)
            .finish_non_exhaustive()
    }
}

impl Default for ConstraintValidator {
    fn default() -> Self {
        Self::new()
    }
}

type Check<'a> = Box<dyn Fn() -> Vec<Violation> + Send + Sync + 'a>;

impl ConstraintValidator {
    /// Creates a validator with default thresholds and no-op seams.
    pub fn new() -> Self {
        Self {
            config: AuditConfig::default(),
            availability: AvailabilityIndex::new(),
            distribution: Arc::new(NoDistributionPolicy),
        }
    }

    /// Sets thresholds.
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Supplies faculty availability data.
    pub fn with_availability(mut self, availability: AvailabilityIndex) -> Self {
        self.availability = availability;
        self
    }

    /// Sets the subject distribution policy.
    pub fn with_distribution_policy(mut self, policy: impl DistributionPolicy + 'static) -> Self {
        self.distribution = Arc::new(policy);
        self
    }

    /// Audits entry records.
    ///
    /// Pure function of the input: auditing the same list twice yields
    /// identical reports.
    pub fn audit(&self, entries: &[EntryRecord]) -> AuditReport {
        info!(event = "audit_start", entries = entries.len());

        let limit = self.config.workload_warning_hours;
        let mut battery: Vec<Check<'_>> = Vec::with_capacity(7);
        battery.push(Box::new(|| checks::faculty_conflicts(entries)));
        battery.push(Box::new(|| checks::classroom_conflicts(entries)));
        battery.push(Box::new(|| checks::section_conflicts(entries)));
        battery.push(Box::new(|| checks::faculty_availability(entries, &self.availability)));
        battery.push(Box::new(|| checks::classroom_capacity(entries)));
        battery.push(Box::new(move || checks::workload_balance(entries, limit)));
        battery.push(Box::new(|| self.distribution.check(entries)));

        let findings = self.run_checks(&battery);

        let (warnings, violations): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .flatten()
            .partition(|v| v.kind.is_soft());

        let report = AuditReport {
            total_entries: entries.len(),
            valid_entries: entries.len() as i64 - violations.len() as i64,
            violations,
            warnings,
        };

        info!(
            event = "audit_end",
            violations = report.violations.len(),
            warnings = report.warnings.len(),
        );

        report
    }

    /// Audits allocator output.
    pub fn audit_schedule(&self, entries: &[ScheduleEntry]) -> AuditReport {
        let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
        self.audit(&records)
    }

    #[cfg(feature = "parallel")]
    fn run_checks(&self, battery: &[Check<'_>]) -> Vec<Vec<Violation>> {
        use rayon::prelude::*;

        if self.config.parallel {
            battery.par_iter().map(|check| check()).collect()
        } else {
            battery.iter().map(|check| check()).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_checks(&self, battery: &[Check<'_>]) -> Vec<Vec<Violation>> {
        battery.iter().map(|check| check()).collect()
    }
}
