//! Allocation agent.

use std::fmt;

use super::{Agent, AgentResult};
use crate::error::{Result, TimetableError};
use crate::scheduler::{AllocationRequest, AllocationStrategy, GreedyAllocator, SlotGrid};
use crate::validation::validate_input;

/// Generates a conflict-free timetable for a request.
///
/// Malformed input (missing or duplicate IDs) is an error. Unplaceable
/// classes are not: the result succeeds with fewer entries than
/// `expected_entries`.
pub struct TimetableAgent {
    strategy: Box<dyn AllocationStrategy>,
    grid: SlotGrid,
}

impl TimetableAgent {
    /// Greedy allocation on the standard week.
    pub fn new() -> Self {
        Self::with_strategy(GreedyAllocator::new(), SlotGrid::standard_week())
    }

    /// Custom policy and grid.
    pub fn with_strategy(strategy: impl AllocationStrategy + 'static, grid: SlotGrid) -> Self {
        Self {
            strategy: Box::new(strategy),
            grid,
        }
    }

    /// Replaces the slot grid.
    pub fn with_grid(mut self, grid: SlotGrid) -> Self {
        self.grid = grid;
        self
    }

    /// The slot grid in use.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }
}

impl Default for TimetableAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimetableAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimetableAgent")
            .field("slots", &self.grid.len())
            .finish_non_exhaustive()
    }
}

impl Agent for TimetableAgent {
    type Input = AllocationRequest;

    fn name(&self) -> &str {
        "TimetableAgent"
    }

    fn description(&self) -> &str {
        "Generates constraint-aware timetable"
    }

    fn execute(&self, request: &AllocationRequest) -> Result<AgentResult> {
        validate_input(
            &request.sections,
            &request.subjects,
            &request.faculty,
            &request.classrooms,
        )
        .map_err(TimetableError::InvalidInput)?;

        let allocation = self.strategy.allocate(request, &self.grid)?;
        let message = format!(
            "Generated {} conflict-free schedule entries for {} sections",
            allocation.total_entries(),
            allocation.sections_scheduled
        );
        Ok(AgentResult::success(allocation.into_data()?, message))
    }
}
