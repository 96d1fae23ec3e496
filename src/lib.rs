//! Egg Wisdom scenario runner
//!
//! Scenarios are ordered lists of transactions and queries. A [`Runner`]
//! executes them against a pluggable [`backend::Backend`], never stopping on
//! a failed step, and reports each result as it arrives.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Config, Error, Result};
pub use scenario::{Outcome, Runner, Scenario, ScenarioResult, Step, StepKind};
