//! Output sinks for step results

use colored::Colorize;

use crate::common::PrintOptions;

use super::result::{Outcome, ScenarioResult, ScenarioSummary};
use super::runner::ExecutionContext;
use super::step::Scenario;

/// Receives results as a scenario runs
pub trait Reporter {
    fn scenario_started(&mut self, _scenario: &Scenario, _context: &ExecutionContext) {}

    /// Called once per step, before the next step starts. `index` is 1-based.
    fn step_finished(&mut self, index: usize, result: &ScenarioResult);

    fn scenario_finished(&mut self, _summary: &ScenarioSummary) {}
}

/// Human-readable colored status lines on stdout
pub struct ConsoleReporter {
    print: PrintOptions,
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(print: PrintOptions, verbose: bool) -> Self {
        Self { print, verbose }
    }

    /// Lines printed for one finished step
    fn step_lines(&self, index: usize, result: &ScenarioResult) -> Vec<String> {
        let show_arguments = self.print.arguments || self.verbose;
        let mut lines = Vec::new();

        match &result.outcome {
            Outcome::Ok(payload) => {
                lines.push(format!(
                    "  {} Step {}: {}",
                    "✓".green(),
                    index,
                    result.step.to_string().dimmed()
                ));
                if show_arguments {
                    lines.extend(argument_lines(result));
                }
                if self.print.payloads && !payload.is_null() {
                    let rendered =
                        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
                    for line in rendered.lines() {
                        lines.push(format!("      {}", line.dimmed()));
                    }
                }
            }
            Outcome::Failed(message) => {
                lines.push(format!(
                    "  {} Step {}: {}: {}",
                    "✗".red(),
                    index,
                    result.step,
                    message.red()
                ));
                if show_arguments {
                    lines.extend(argument_lines(result));
                }
            }
        }

        if self.verbose {
            lines.push(format!("      {}", format!("({:.1?})", result.elapsed).dimmed()));
        }
        lines
    }
}

impl Reporter for ConsoleReporter {
    fn scenario_started(&mut self, scenario: &Scenario, context: &ExecutionContext) {
        println!(
            "\n{} {}",
            "Running Scenario:".blue().bold(),
            scenario.name.white().bold()
        );
        if let Some(desc) = &scenario.description {
            println!("  {}", desc.dimmed());
        }
        println!("  Network: {}", context.network.to_string().dimmed());

        if self.verbose {
            for credential in context.identities() {
                println!(
                    "  Identity: {} {}",
                    credential.name,
                    credential.address.dimmed()
                );
            }
        }

        println!("\n{}", "Steps:".cyan());
    }

    fn step_finished(&mut self, index: usize, result: &ScenarioResult) {
        for line in self.step_lines(index, result) {
            println!("{}", line);
        }
    }

    fn scenario_finished(&mut self, summary: &ScenarioSummary) {
        if summary.all_succeeded() {
            println!(
                "\n{} {}\n",
                "✓".green().bold(),
                format!("{} steps succeeded", summary.total).green().bold()
            );
        } else {
            println!(
                "\n{} {}\n",
                "✗".yellow().bold(),
                format!(
                    "{} of {} steps failed",
                    summary.failed, summary.total
                )
                .yellow()
                .bold()
            );
        }
    }
}

fn argument_lines(result: &ScenarioResult) -> impl Iterator<Item = String> + '_ {
    result
        .step
        .args
        .iter()
        .map(|(key, value)| format!("      {} = {}", key.cyan(), value))
}

/// Keeps every result in memory
#[derive(Default)]
pub struct CollectingReporter {
    pub started: Option<String>,
    pub results: Vec<(usize, ScenarioResult)>,
    pub summary: Option<ScenarioSummary>,
}

impl Reporter for CollectingReporter {
    fn scenario_started(&mut self, scenario: &Scenario, _context: &ExecutionContext) {
        self.started = Some(scenario.name.clone());
    }

    fn step_finished(&mut self, index: usize, result: &ScenarioResult) {
        self.results.push((index, result.clone()));
    }

    fn scenario_finished(&mut self, summary: &ScenarioSummary) {
        self.summary = Some(summary.clone());
    }
}
