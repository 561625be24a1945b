//! `stockbook-layout` — warehouse zone assignment.
//!
//! A bounded greedy heuristic, not a general assignment solver: products are
//! ranked by turnover and packed into zones by accessibility. Provably
//! optimal placement under multi-dimensional constraints would need a
//! min-cost-flow style solver behind the same contract.

pub mod planner;

pub use planner::{optimize_layout, LayoutPlan, ZoneAssignment};
