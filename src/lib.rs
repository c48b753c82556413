//! Constraint-aware weekly timetable generation.
//!
//! Places class meetings (section × subject × hour) into a weekly slot
//! grid, assigning a qualified faculty member and a large-enough
//! classroom to each, then audits any proposed timetable for hard
//! violations and soft warnings.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Faculty`, `Subject`, `Classroom`, `Section`,
//!   `TimeSlot`, `ScheduleEntry`, `EntryRecord`, `Violation`, `Constraint`
//! - **`scheduler`**: Slot grid, greedy allocator and allocation KPIs
//! - **`audit`**: Constraint validator (double-booking, availability,
//!   capacity, workload, distribution)
//! - **`agent`**: Uniform agent contract and the status-tracking task runner
//! - **`session`**: In-memory store of reference data and generated timetables
//! - **`validation`**: Input integrity checks (missing and duplicate IDs)
//! - **`config`**: TOML-loadable grid and audit settings
//!
//! # Example
//!
//! ```
//! use u_timetable::audit::ConstraintValidator;
//! use u_timetable::models::{Classroom, Faculty, Section, Subject};
//! use u_timetable::scheduler::{AllocationRequest, AllocationStrategy, GreedyAllocator, SlotGrid};
//!
//! let request = AllocationRequest::new(
//!     vec![Section::new("S1", 30).with_subjects(vec!["MATH".into(), "PHYS".into()])],
//!     vec![Subject::new("MATH", 2), Subject::new("PHYS", 2)],
//!     vec![
//!         Faculty::new("F1").with_subject("MATH"),
//!         Faculty::new("F2").with_subject("PHYS"),
//!     ],
//!     vec![Classroom::new("R1", 40)],
//! );
//!
//! let allocation = GreedyAllocator::new()
//!     .allocate(&request, &SlotGrid::standard_week())
//!     .unwrap();
//! assert_eq!(allocation.total_entries(), 4);
//!
//! let report = ConstraintValidator::new().audit_schedule(&allocation.entries);
//! assert!(report.is_valid());
//! ```
//!
//! # Features
//!
//! - `parallel`: runs the audit checks on the rayon pool when
//!   `AuditConfig::parallel` is set.

pub mod agent;
pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod validation;

pub use error::{Result, TimetableError};
