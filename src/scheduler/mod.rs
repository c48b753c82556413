//! Slot grid, greedy allocation, and allocation KPIs.
//!
//! # Algorithm
//!
//! `GreedyAllocator` is a deterministic first-fit heuristic: sections and
//! subjects in input order, slots earliest-first, first qualified free
//! faculty member, smallest free room that fits. It is not optimal and
//! never backtracks; alternative policies plug in through
//! [`AllocationStrategy`].
//!
//! # KPI
//!
//! `AllocationKpi` reports quota shortfalls, fill rate, faculty hours and
//! room utilization.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod greedy;
mod grid;
mod kpi;

pub use greedy::{Allocation, AllocationRequest, AllocationStrategy, GreedyAllocator};
pub use grid::SlotGrid;
pub use kpi::{AllocationKpi, Shortfall};
