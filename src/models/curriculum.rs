//! Curriculum models: subjects and student sections.
//!
//! A section takes a list of subjects; each subject demands a fixed
//! number of one-hour classes per week.

use serde::{Deserialize, Serialize};

/// A subject (course) taught to sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Catalogue code (e.g. `"MA101"`).
    #[serde(default)]
    pub code: String,
    /// Number of one-hour classes required per section per week.
    pub hours_per_week: u32,
    /// Whether classes need a laboratory.
    #[serde(default)]
    pub requires_lab: bool,
}

impl Subject {
    /// Creates a subject with the given weekly class count.
    pub fn new(id: impl Into<String>, hours_per_week: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            code: String::new(),
            hours_per_week,
            requires_lab: false,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the catalogue code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Marks the subject as lab-based.
    pub fn with_lab(mut self) -> Self {
        self.requires_lab = true;
        self
    }
}

/// A cohort of students that attends classes together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Headcount; classrooms must seat at least this many.
    pub num_students: u32,
    /// Subject IDs taken by this section, in scheduling order.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl Section {
    /// Creates a section with no subjects.
    pub fn new(id: impl Into<String>, num_students: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            num_students,
            subjects: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.push(subject_id.into());
        self
    }

    /// Sets all subjects at once.
    pub fn with_subjects(mut self, subject_ids: Vec<String>) -> Self {
        self.subjects = subject_ids;
        self
    }

    /// Whether this section takes the subject.
    pub fn takes(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|s| s == subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("CHEM", 4)
            .with_name("Chemistry")
            .with_code("CH101")
            .with_lab();
        assert_eq!(s.hours_per_week, 4);
        assert_eq!(s.code, "CH101");
        assert!(s.requires_lab);
    }

    #[test]
    fn test_section_subjects_keep_order() {
        let sec = Section::new("CSE-A", 60)
            .with_subject("PHYS")
            .with_subject("MATH");
        assert_eq!(sec.subjects, vec!["PHYS".to_string(), "MATH".to_string()]);
        assert!(sec.takes("MATH"));
        assert!(!sec.takes("CHEM"));
    }

    #[test]
    fn test_subject_requires_hours() {
        let missing = serde_json::from_str::<Subject>(r#"{"id": "MATH"}"#);
        assert!(missing.is_err());
        let ok: Subject = serde_json::from_str(r#"{"id": "MATH", "hours_per_week": 3}"#).unwrap();
        assert!(!ok.requires_lab);
    }
}
