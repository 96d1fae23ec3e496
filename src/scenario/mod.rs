//! Scenario model and runner
//!
//! A scenario is data: an ordered list of transactions and queries loaded
//! from YAML or taken from the built-in set. The [`Runner`] replays it
//! against a backend and hands every result to a [`Reporter`].

pub mod builtin;
mod report;
mod result;
mod runner;
mod step;

pub use report::{CollectingReporter, ConsoleReporter, Reporter};
pub use result::{Outcome, ScenarioResult, ScenarioSummary};
pub use runner::{ExecutionContext, Runner};
pub use step::{Arguments, Scenario, Step, StepKind};
