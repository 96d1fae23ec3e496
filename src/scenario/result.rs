//! Per-step results

use serde_json::Value;
use std::time::Duration;

use super::step::Step;

/// What happened when a step ran
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Backend accepted the step; payload is backend-defined
    Ok(Value),
    /// Backend (or the runner) rejected the step
    Failed(String),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_failed(&self) -> bool {
        !self.is_ok()
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Failed(message) => Some(message),
        }
    }
}

/// Result of one executed step
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// The originating step
    pub step: Step,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Counts over a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSummary {
    pub name: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ScenarioSummary {
    pub fn from_results(name: &str, results: &[ScenarioResult]) -> Self {
        let failed = results.iter().filter(|r| r.outcome.is_failed()).count();
        Self {
            name: name.to_string(),
            total: results.len(),
            succeeded: results.len() - failed,
            failed,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
