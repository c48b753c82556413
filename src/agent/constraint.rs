//! Constraint auditing agent.

use super::{Agent, AgentResult};
use crate::audit::ConstraintValidator;
use crate::error::Result;
use crate::models::EntryRecord;

/// Audits entry records; succeeds only when no hard constraint is violated.
#[derive(Debug, Clone, Default)]
pub struct ConstraintAgent {
    validator: ConstraintValidator,
}

impl ConstraintAgent {
    /// Agent with the default validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent with a configured validator.
    pub fn with_validator(validator: ConstraintValidator) -> Self {
        Self { validator }
    }

    /// The validator in use.
    pub fn validator(&self) -> &ConstraintValidator {
        &self.validator
    }

    /// Replaces the validator in place.
    pub fn set_validator(&mut self, validator: ConstraintValidator) {
        self.validator = validator;
    }
}

impl Agent for ConstraintAgent {
    type Input = [EntryRecord];

    fn name(&self) -> &str {
        "ConstraintAgent"
    }

    fn description(&self) -> &str {
        "Validates hard and soft constraints in the timetable"
    }

    fn execute(&self, entries: &[EntryRecord]) -> Result<AgentResult> {
        let report = self.validator.audit(entries);
        let message = format!(
            "Validated {} schedule entries. Found {} violations and {} warnings.",
            report.total_entries,
            report.violations.len(),
            report.warnings.len()
        );

        Ok(AgentResult {
            success: report.is_valid(),
            data: report.to_data(),
            message,
            errors: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentStatus, TaskRunner};

    #[test]
    fn test_violations_fail_the_run() {
        let entries = vec![
            EntryRecord::new().at("Monday", "09:00", "10:00").with_section("S1", 30),
            EntryRecord::new().at("Monday", "09:00", "10:00").with_section("S1", 30),
        ];
        let mut runner = TaskRunner::new(ConstraintAgent::new());
        let result = runner.run(&entries);

        assert!(!result.success);
        assert_eq!(runner.status(), AgentStatus::Failed);
        assert_eq!(
            result.message,
            "Validated 2 schedule entries. Found 1 violations and 0 warnings."
        );
        let violations: Vec<String> = result.field("violations").unwrap();
        assert_eq!(
            violations,
            vec!["Section conflict: S1 has multiple classes at Monday|09:00|10:00".to_string()]
        );
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let entries: Vec<EntryRecord> = (0..21)
            .map(|_| EntryRecord::new().with_faculty("F1"))
            .collect();
        let mut runner = TaskRunner::new(ConstraintAgent::new());
        let result = runner.run(&entries);

        assert!(result.success);
        let warnings: Vec<String> = result.field("warnings").unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(result.field::<i64>("valid_entries").unwrap(), 21);
    }
}
