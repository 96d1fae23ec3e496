//! Scenario runner
//!
//! Executes steps one at a time against a [`Backend`]. A failing step is
//! recorded and reported, and the next step runs regardless.

use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Instant;

use crate::backend::{Backend, Credential};
use crate::common::{Config, Error, Network, PrintOptions, Result};

use super::report::Reporter;
use super::result::{Outcome, ScenarioResult, ScenarioSummary};
use super::step::{Scenario, Step, StepKind};

/// Settings fixed for the duration of a run
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub network: Network,
    pub print: PrintOptions,
    identities: IndexMap<String, Credential>,
}

impl ExecutionContext {
    /// Look up a resolved identity by its short name
    pub fn credential(&self, name: &str) -> Option<&Credential> {
        self.identities.get(name)
    }

    pub fn identities(&self) -> impl Iterator<Item = &Credential> {
        self.identities.values()
    }
}

/// Runs scenarios against one backend
pub struct Runner {
    context: ExecutionContext,
    backend: Arc<dyn Backend>,
}

impl Runner {
    /// Connect to the backend and resolve every configured identity
    ///
    /// Any failure here is a configuration error and no step may run.
    pub async fn initialize(config: &Config, backend: Arc<dyn Backend>) -> Result<Self> {
        backend
            .connect(&config.network)
            .await
            .map_err(|e| Error::backend_unreachable(&config.network.to_string(), e))?;

        let mut identities = IndexMap::new();
        for (name, identity) in &config.identities {
            let credential = backend
                .resolve_identity(name, identity)
                .await
                .map_err(|e| Error::identity_resolution(name, e))?;
            tracing::debug!(identity = %name, address = %credential.address, "Resolved identity");
            identities.insert(name.clone(), credential);
        }

        tracing::info!(
            network = %config.network,
            identities = identities.len(),
            "Execution context ready"
        );

        Ok(Self {
            context: ExecutionContext {
                network: config.network.clone(),
                print: config.print.clone(),
                identities,
            },
            backend,
        })
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Execute a single step
    ///
    /// Never fails: every problem becomes [`Outcome::Failed`].
    pub async fn run_step(&self, step: &Step) -> ScenarioResult {
        let started = Instant::now();
        tracing::debug!(kind = %step.kind, name = %step.name, "Dispatching step");

        let outcome = match step.kind {
            StepKind::Query => match self.backend.evaluate_query(&step.name, &step.args).await {
                Ok(payload) => Outcome::Ok(payload),
                Err(e) => Outcome::Failed(e.to_string()),
            },
            StepKind::Transaction => self.submit(step).await,
        };

        if let Outcome::Failed(message) = &outcome {
            tracing::warn!(step = %step, error = %message, "Step failed");
        }

        ScenarioResult {
            step: step.clone(),
            outcome,
            elapsed: started.elapsed(),
        }
    }

    async fn submit(&self, step: &Step) -> Outcome {
        let Some(signer) = step.signer.as_deref() else {
            return Outcome::Failed(format!("transaction '{}' has no signer", step.name));
        };
        let Some(credential) = self.context.credential(signer) else {
            return Outcome::Failed(format!("unknown identity '{}'", signer));
        };

        match self
            .backend
            .submit_transaction(&step.name, credential, &step.args)
            .await
        {
            Ok(payload) => Outcome::Ok(payload),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }

    /// Execute every step in order, reporting each result as it arrives
    ///
    /// Returns one result per step, in input order.
    pub async fn run_scenario(
        &self,
        steps: &[Step],
        reporter: &mut dyn Reporter,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            let result = self.run_step(step).await;
            reporter.step_finished(i + 1, &result);
            results.push(result);
        }
        results
    }

    /// Run a whole scenario with start and summary notifications
    pub async fn run(
        &self,
        scenario: &Scenario,
        reporter: &mut dyn Reporter,
    ) -> (Vec<ScenarioResult>, ScenarioSummary) {
        reporter.scenario_started(scenario, &self.context);
        let results = self.run_scenario(&scenario.steps, reporter).await;
        let summary = ScenarioSummary::from_results(&scenario.name, &results);
        reporter.scenario_finished(&summary);
        (results, summary)
    }
}
