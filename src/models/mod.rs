//! Timetabling domain models.
//!
//! Provides the data types for describing a weekly academic timetable
//! problem (who teaches what, to whom, where) and its solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Section | Task (demand) |
//! | Subject | Activity type with a weekly quota |
//! | Faculty | Human resource with skills |
//! | Classroom | Capacitated primary resource |
//! | TimeSlot | Discrete time bucket |
//! | ScheduleEntry | Assignment |

mod constraint;
mod curriculum;
mod resource;
mod schedule;
mod slot;

pub use constraint::{Constraint, ConstraintKind};
pub use curriculum::{Section, Subject};
pub use resource::{Classroom, Faculty, RoomType};
pub use schedule::{EntryRecord, ScheduleEntry, Violation, ViolationKind};
pub use slot::{SlotId, TimeSlot};
