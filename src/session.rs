//! In-memory timetable session.
//!
//! A [`TimetableSession`] owns the uploaded reference data and every
//! timetable generated from it. Generation runs the allocation agent and
//! then the constraint agent through their task runners, so agent status
//! and history survive across calls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::agent::{AgentStatusReport, ConstraintAgent, TaskRunner, TimetableAgent};
use crate::audit::{AvailabilityIndex, ConstraintValidator};
use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::models::{Classroom, Constraint, EntryRecord, Faculty, ScheduleEntry, Section, Subject};
use crate::scheduler::{AllocationRequest, SlotGrid};

/// Parameters of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub academic_year: String,
    pub semester: u32,
    /// Sections to schedule; empty means all.
    #[serde(default)]
    pub section_ids: Vec<String>,
}

impl GenerateRequest {
    /// Request covering every section.
    pub fn new(academic_year: impl Into<String>, semester: u32) -> Self {
        Self {
            academic_year: academic_year.into(),
            semester,
            section_ids: Vec::new(),
        }
    }

    /// Restricts generation to the given sections.
    pub fn with_sections(mut self, section_ids: Vec<String>) -> Self {
        self.section_ids = section_ids;
        self
    }
}

/// A generated timetable together with its audit outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    pub id: String,
    pub name: String,
    pub academic_year: String,
    pub semester: u32,
    pub schedule: Vec<ScheduleEntry>,
    /// Whether the audit found no hard violation.
    pub constraints_satisfied: bool,
    /// Audit payload (`violations`, `warnings`, `total_entries`, `valid_entries`).
    pub validation: Map<String, Value>,
}

/// Listing row for a stored timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableSummary {
    pub id: String,
    pub name: String,
    pub academic_year: String,
    pub semester: u32,
    pub entries_count: usize,
    pub constraints_satisfied: bool,
}

impl From<&Timetable> for TimetableSummary {
    fn from(tt: &Timetable) -> Self {
        Self {
            id: tt.id.clone(),
            name: tt.name.clone(),
            academic_year: tt.academic_year.clone(),
            semester: tt.semester,
            entries_count: tt.schedule.len(),
            constraints_satisfied: tt.constraints_satisfied,
        }
    }
}

/// Record counts held by a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataSummary {
    pub faculty_count: usize,
    pub subjects_count: usize,
    pub classrooms_count: usize,
    pub sections_count: usize,
    pub constraints_count: usize,
    pub timetables_count: usize,
}

/// Reference data, generated timetables and the two agent runners.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Classroom, Faculty, Section, Subject};
/// use u_timetable::session::{GenerateRequest, TimetableSession};
///
/// let mut session = TimetableSession::new();
/// session.set_sections(vec![Section::new("S1", 30).with_subject("MATH")]);
/// session.set_subjects(vec![Subject::new("MATH", 2)]);
/// session.set_faculty(vec![Faculty::new("F1").with_subject("MATH")]);
/// session.set_classrooms(vec![Classroom::new("R1", 40)]);
///
/// let tt = session.generate(&GenerateRequest::new("2024-2025", 1)).unwrap();
/// assert_eq!(tt.id, "tt_2024-2025_1_0");
/// assert_eq!(tt.schedule.len(), 2);
/// assert!(tt.constraints_satisfied);
/// ```
#[derive(Debug)]
pub struct TimetableSession {
    config: TimetableConfig,
    faculty: Vec<Faculty>,
    subjects: Vec<Subject>,
    classrooms: Vec<Classroom>,
    sections: Vec<Section>,
    constraints: Vec<Constraint>,
    timetables: Vec<Timetable>,
    timetable_runner: TaskRunner<TimetableAgent>,
    constraint_runner: TaskRunner<ConstraintAgent>,
}

impl Default for TimetableSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TimetableSession {
    /// Session with the default configuration.
    pub fn new() -> Self {
        Self::build(TimetableConfig::default(), SlotGrid::standard_week())
    }

    /// Session with a custom configuration.
    ///
    /// # Errors
    ///
    /// [`TimetableError::Config`] when the grid configuration is invalid.
    pub fn with_config(config: TimetableConfig) -> Result<Self> {
        let grid = SlotGrid::from_config(&config.grid)?;
        Ok(Self::build(config, grid))
    }

    fn build(config: TimetableConfig, grid: SlotGrid) -> Self {
        Self {
            faculty: Vec::new(),
            subjects: Vec::new(),
            classrooms: Vec::new(),
            sections: Vec::new(),
            constraints: Vec::new(),
            timetables: Vec::new(),
            timetable_runner: TaskRunner::new(TimetableAgent::new().with_grid(grid)),
            constraint_runner: TaskRunner::new(ConstraintAgent::with_validator(
                ConstraintValidator::new().with_config(config.audit.clone()),
            )),
            config,
        }
    }

    /// Replaces the faculty records.
    pub fn set_faculty(&mut self, faculty: Vec<Faculty>) {
        self.faculty = faculty;
    }

    /// Replaces the subject catalogue.
    pub fn set_subjects(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
    }

    /// Replaces the classroom records.
    pub fn set_classrooms(&mut self, classrooms: Vec<Classroom>) {
        self.classrooms = classrooms;
    }

    /// Replaces the section records.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
    }

    /// Replaces the constraint records.
    pub fn set_constraints(&mut self, constraints: Vec<Constraint>) {
        self.constraints = constraints;
    }

    /// Faculty records.
    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    /// Subject catalogue.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Classroom records.
    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    /// Section records.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Constraint records.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Generates, audits and stores a timetable.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::MissingData`] if faculty, subjects, classrooms or
    ///   sections is empty.
    /// - [`TimetableError::GenerationFailed`] if the allocation agent fails.
    ///
    /// A timetable that violates constraints is still stored; check
    /// [`Timetable::constraints_satisfied`].
    pub fn generate(&mut self, request: &GenerateRequest) -> Result<&Timetable> {
        if self.faculty.is_empty()
            || self.subjects.is_empty()
            || self.classrooms.is_empty()
            || self.sections.is_empty()
        {
            return Err(TimetableError::MissingData(
                "faculty, subjects, classrooms, and sections are all required".into(),
            ));
        }

        let sections: Vec<Section> = if request.section_ids.is_empty() {
            self.sections.clone()
        } else {
            self.sections
                .iter()
                .filter(|s| request.section_ids.contains(&s.id))
                .cloned()
                .collect()
        };

        let allocation_request = AllocationRequest::new(
            sections,
            self.subjects.clone(),
            self.faculty.clone(),
            self.classrooms.clone(),
        )
        .with_constraints(self.constraints.clone());

        let generated = self.timetable_runner.run(&allocation_request);
        if !generated.success {
            return Err(TimetableError::GenerationFailed {
                message: generated.message,
                errors: generated.errors,
            });
        }
        let schedule: Vec<ScheduleEntry> = generated.field("schedule_entries")?;

        let validator = ConstraintValidator::new()
            .with_config(self.config.audit.clone())
            .with_availability(AvailabilityIndex::from_faculty(&self.faculty));
        self.constraint_runner.agent_mut().set_validator(validator);

        let records: Vec<EntryRecord> = schedule.iter().map(EntryRecord::from).collect();
        let audited = self.constraint_runner.run(&records);

        let timetable = Timetable {
            id: format!(
                "tt_{}_{}_{}",
                request.academic_year,
                request.semester,
                self.timetables.len()
            ),
            name: format!(
                "Timetable {} Semester {}",
                request.academic_year, request.semester
            ),
            academic_year: request.academic_year.clone(),
            semester: request.semester,
            schedule,
            constraints_satisfied: audited.success,
            validation: audited.data,
        };

        info!(
            event = "timetable_stored",
            id = %timetable.id,
            entries = timetable.schedule.len(),
            constraints_satisfied = timetable.constraints_satisfied,
        );

        self.timetables.push(timetable);
        self.timetables
            .last()
            .ok_or_else(|| TimetableError::Internal("timetable store is empty after push".into()))
    }

    /// Looks up a stored timetable.
    pub fn timetable(&self, id: &str) -> Result<&Timetable> {
        self.timetables
            .iter()
            .find(|tt| tt.id == id)
            .ok_or_else(|| TimetableError::NotFound(format!("timetable {id}")))
    }

    /// Summaries of every stored timetable, oldest first.
    pub fn timetables(&self) -> Vec<TimetableSummary> {
        self.timetables.iter().map(TimetableSummary::from).collect()
    }

    /// Record counts.
    pub fn summary(&self) -> DataSummary {
        DataSummary {
            faculty_count: self.faculty.len(),
            subjects_count: self.subjects.len(),
            classrooms_count: self.classrooms.len(),
            sections_count: self.sections.len(),
            constraints_count: self.constraints.len(),
            timetables_count: self.timetables.len(),
        }
    }

    /// Status of the allocation and constraint agents, in that order.
    pub fn agent_status(&self) -> Vec<AgentStatusReport> {
        vec![
            self.timetable_runner.status_report(),
            self.constraint_runner.status_report(),
        ]
    }
}
