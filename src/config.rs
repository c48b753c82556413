//! Timetable configuration.
//!
//! Load configuration from TOML to change the weekly slot grid or the
//! audit thresholds without code changes. Every section is optional;
//! missing values fall back to the standard teaching week.
//!
//! # Examples
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     [grid]
//!     days = ["Monday", "Wednesday"]
//!     windows = [{ start = "08:00", end = "09:30" }]
//!
//!     [audit]
//!     workload_warning_hours = 18
//! "#).unwrap();
//!
//! assert_eq!(config.grid.days.len(), 2);
//! assert_eq!(config.audit.workload_warning_hours, 18);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let config = TimetableConfig::load("timetable.toml").unwrap_or_default();
//! assert_eq!(config.grid.windows.len(), 7);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TimetableConfig {
    /// Weekly slot grid.
    #[serde(default)]
    pub grid: GridConfig,
    /// Constraint auditing.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl TimetableConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Replaces the grid configuration.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Replaces the audit configuration.
    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}

/// One daily teaching window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
}

impl WindowConfig {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Weekly slot grid layout.
///
/// Slots are the cross product `days × windows`, day-major.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GridConfig {
    /// Teaching days in order.
    #[serde(default = "default_days")]
    pub days: Vec<String>,
    /// Daily windows in order.
    #[serde(default = "default_windows")]
    pub windows: Vec<WindowConfig>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            windows: default_windows(),
        }
    }
}

impl GridConfig {
    /// Sets the teaching days.
    pub fn with_days(mut self, days: Vec<String>) -> Self {
        self.days = days;
        self
    }

    /// Sets the daily windows.
    pub fn with_windows(mut self, windows: Vec<WindowConfig>) -> Self {
        self.windows = windows;
        self
    }
}

fn default_days() -> Vec<String> {
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

// 09:00-17:00 in one-hour windows, 12:00-13:00 kept free for lunch.
fn default_windows() -> Vec<WindowConfig> {
    [
        ("09:00", "10:00"),
        ("10:00", "11:00"),
        ("11:00", "12:00"),
        ("13:00", "14:00"),
        ("14:00", "15:00"),
        ("15:00", "16:00"),
        ("16:00", "17:00"),
    ]
    .iter()
    .map(|(s, e)| WindowConfig::new(*s, *e))
    .collect()
}

/// Auditor thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Weekly hours above which a faculty member gets a workload warning.
    #[serde(default = "default_workload_warning_hours")]
    pub workload_warning_hours: u32,
    /// Run checks on the rayon pool (requires the `parallel` feature).
    #[serde(default)]
    pub parallel: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            workload_warning_hours: default_workload_warning_hours(),
            parallel: false,
        }
    }
}

impl AuditConfig {
    /// Sets the workload warning threshold.
    pub fn with_workload_warning_hours(mut self, hours: u32) -> Self {
        self.workload_warning_hours = hours;
        self
    }

    /// Enables or disables parallel checks.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

fn default_workload_warning_hours() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimetableError;

    #[test]
    fn test_defaults() {
        let config = TimetableConfig::default();
        assert_eq!(config.grid.days.len(), 5);
        assert_eq!(config.grid.days[0], "Monday");
        assert_eq!(config.grid.windows.len(), 7);
        assert!(config.grid.windows.iter().all(|w| w.start != "12:00"));
        assert_eq!(config.audit.workload_warning_hours, 20);
        assert!(!config.audit.parallel);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TimetableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TimetableConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TimetableConfig::from_toml_str(
            r#"
            [grid]
            days = ["Saturday"]
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.days, vec!["Saturday".to_string()]);
        assert_eq!(config.grid.windows.len(), 7);
    }

    #[test]
    fn test_invalid_toml() {
        let err = TimetableConfig::from_toml_str("[audit]\nworkload_warning_hours = \"x\"")
            .unwrap_err();
        assert!(matches!(err, TimetableError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TimetableConfig::load("/nonexistent/timetable.toml").unwrap_err();
        assert!(matches!(err, TimetableError::Io(_)));
    }

    #[test]
    fn test_builders() {
        let config = TimetableConfig::new()
            .with_audit(AuditConfig::default().with_workload_warning_hours(12).with_parallel(true))
            .with_grid(GridConfig::default().with_days(vec!["Monday".into()]));
        assert_eq!(config.audit.workload_warning_hours, 12);
        assert!(config.audit.parallel);
        assert_eq!(config.grid.days.len(), 1);
    }
}
