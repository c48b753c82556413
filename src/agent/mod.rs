//! Uniform execution contract for the allocator and the auditor.
//!
//! An [`Agent`] does one unit of work and reports it as an
//! [`AgentResult`]. A [`TaskRunner`] owns an agent, tracks its
//! [`AgentStatus`] and keeps a history of every result.
//!
//! # Lifecycle
//!
//! `Idle → Running → Completed | Failed`. A run completes only when the
//! agent returns a successful result. Errors returned by the agent and
//! panics inside it are both converted into a failed result; nothing
//! escapes [`TaskRunner::run`].

mod constraint;
mod timetable;

pub use constraint::ConstraintAgent;
pub use timetable::TimetableAgent;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{Result, TimetableError};

/// Execution status of a runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Never run.
    #[default]
    Idle,
    /// A run is in progress.
    Running,
    /// Last run succeeded.
    Completed,
    /// Last run failed.
    Failed,
}

/// Result envelope shared by every agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub success: bool,
    /// Agent-specific payload.
    pub data: Map<String, Value>,
    pub message: String,
    pub errors: Vec<String>,
}

impl AgentResult {
    /// A successful result.
    pub fn success(data: Map<String, Value>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A failed result with no payload.
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: Map::new(),
            message: message.into(),
            errors,
        }
    }

    /// Decodes one payload field.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .data
            .get(key)
            .ok_or_else(|| TimetableError::Internal(format!("result has no '{key}' field")))?;
        Ok(T::deserialize(value)?)
    }
}

/// A unit of work with a uniform result.
pub trait Agent: Send + Sync {
    /// What the agent consumes.
    type Input: ?Sized;

    /// Short identifier.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Performs the work.
    ///
    /// Return `Err` for malformed input or internal faults; domain
    /// outcomes (including "invalid timetable") belong in the result.
    fn execute(&self, input: &Self::Input) -> Result<AgentResult>;
}

/// Snapshot of a runner for status endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStatusReport {
    pub name: String,
    pub description: String,
    pub status: AgentStatus,
    pub results_count: usize,
}

/// Runs an agent with status tracking and failure containment.
///
/// # Example
///
/// ```
/// use u_timetable::agent::{AgentStatus, ConstraintAgent, TaskRunner};
///
/// let mut runner = TaskRunner::new(ConstraintAgent::new());
/// assert_eq!(runner.status(), AgentStatus::Idle);
///
/// let result = runner.run(&[]);
/// assert!(result.success);
/// assert_eq!(runner.status(), AgentStatus::Completed);
/// assert_eq!(runner.history().len(), 1);
/// ```
#[derive(Debug)]
pub struct TaskRunner<A: Agent> {
    agent: A,
    status: AgentStatus,
    history: Vec<AgentResult>,
}

impl<A: Agent> TaskRunner<A> {
    /// Wraps an agent in the `Idle` state.
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            status: AgentStatus::Idle,
            history: Vec::new(),
        }
    }

    /// Runs the agent once.
    ///
    /// Always returns a result and always records it in the history.
    pub fn run(&mut self, input: &A::Input) -> AgentResult {
        self.status = AgentStatus::Running;
        debug!(agent = self.agent.name(), status = ?self.status);

        let agent = &self.agent;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| agent.execute(input)));

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(agent = self.agent.name(), error = %err, "agent returned an error");
                AgentResult::failure(self.failure_message(), err.details())
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!(agent = self.agent.name(), reason = %reason, "agent panicked");
                AgentResult::failure(self.failure_message(), vec![reason])
            }
        };

        self.status = if result.success {
            AgentStatus::Completed
        } else {
            AgentStatus::Failed
        };
        debug!(agent = self.agent.name(), status = ?self.status);

        self.history.push(result.clone());
        result
    }

    fn failure_message(&self) -> String {
        format!("Agent {} failed", self.agent.name())
    }

    /// Current status.
    pub fn status(&self) -> AgentStatus {
        self.status
    }

    /// Every result so far, oldest first.
    pub fn history(&self) -> &[AgentResult] {
        &self.history
    }

    /// The wrapped agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Mutable access to the wrapped agent; status and history are kept.
    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    /// Status snapshot.
    pub fn status_report(&self) -> AgentStatusReport {
        AgentStatusReport {
            name: self.agent.name().to_string(),
            description: self.agent.description().to_string(),
            status: self.status,
            results_count: self.history.len(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "agent panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test agent whose behavior is chosen by its input.
    struct Scripted;

    enum Script {
        Succeed,
        Reject,
        Error,
        Panic,
    }

    impl Agent for Scripted {
        type Input = Script;

        fn name(&self) -> &str {
            "Scripted"
        }

        fn description(&self) -> &str {
            "test agent"
        }

        fn execute(&self, input: &Script) -> Result<AgentResult> {
            match input {
                Script::Succeed => {
                    let mut data = Map::new();
                    data.insert("answer".into(), Value::from(42));
                    Ok(AgentResult::success(data, "done"))
                }
                Script::Reject => Ok(AgentResult::failure("not valid", vec![])),
                Script::Error => Err(TimetableError::Internal("index out of range".into())),
                Script::Panic => panic!("boom"),
            }
        }
    }

    #[test]
    fn test_success_completes() {
        let mut runner = TaskRunner::new(Scripted);
        let result = runner.run(&Script::Succeed);
        assert!(result.success);
        assert_eq!(runner.status(), AgentStatus::Completed);
        assert_eq!(result.field::<u32>("answer").unwrap(), 42);
    }

    #[test]
    fn test_unsuccessful_result_fails() {
        let mut runner = TaskRunner::new(Scripted);
        let result = runner.run(&Script::Reject);
        assert!(!result.success);
        assert_eq!(result.message, "not valid");
        assert_eq!(runner.status(), AgentStatus::Failed);
    }

    #[test]
    fn test_error_is_contained() {
        let mut runner = TaskRunner::new(Scripted);
        let result = runner.run(&Script::Error);
        assert!(!result.success);
        assert_eq!(result.message, "Agent Scripted failed");
        assert_eq!(result.errors, vec!["Internal error: index out of range".to_string()]);
        assert_eq!(runner.status(), AgentStatus::Failed);
    }

    #[test]
    fn test_panic_is_contained() {
        let mut runner = TaskRunner::new(Scripted);
        let result = runner.run(&Script::Panic);
        assert!(!result.success);
        assert_eq!(result.errors, vec!["boom".to_string()]);
        assert_eq!(runner.status(), AgentStatus::Failed);
    }

    #[test]
    fn test_history_records_every_run() {
        let mut runner = TaskRunner::new(Scripted);
        runner.run(&Script::Succeed);
        runner.run(&Script::Error);
        runner.run(&Script::Succeed);

        assert_eq!(runner.history().len(), 3);
        assert!(!runner.history()[1].success);
        assert_eq!(runner.status(), AgentStatus::Completed);

        let report = runner.status_report();
        assert_eq!(report.name, "Scripted");
        assert_eq!(report.results_count, 3);
    }

    #[test]
    fn test_missing_field() {
        let result = AgentResult::success(Map::new(), "empty");
        assert!(result.field::<u32>("answer").is_err());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_value(AgentStatus::Completed).unwrap(), "completed");
    }
}
