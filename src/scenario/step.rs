//! Scenario data types
//!
//! Defines the data structures for (de)serializing YAML scenarios:
//!
//! ```yaml
//! name: buy-and-check
//! steps:
//!   - kind: transaction
//!     name: buy_eggs
//!     signer: bob
//!     args:
//!       amount: "5"
//!   - kind: query
//!     name: get_owned_nfts
//!     args:
//!       account: bob
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::common::{Error, Result};

/// Ordered step arguments: parameter name to literal value.
///
/// Structured values (arrays, dictionaries) are passed string-encoded, e.g.
/// `["Cat1", "Cat2"]`.
pub type Arguments = IndexMap<String, String>;

/// Whether a step mutates state or only reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Signed, state-mutating operation
    Transaction,
    /// Read-only operation, no signer
    Query,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Transaction => write!(f, "tx"),
            StepKind::Query => write!(f, "query"),
        }
    }
}

/// A single scripted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub kind: StepKind,
    /// Operation to invoke, e.g. `admin/create_phrase`
    pub name: String,
    /// Identity submitting a transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub args: Arguments,
}

impl Step {
    /// A transaction signed by `signer`
    pub fn transaction(name: impl Into<String>, signer: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Transaction,
            name: name.into(),
            signer: Some(signer.into()),
            args: Arguments::new(),
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Query,
            name: name.into(),
            signer: None,
            args: Arguments::new(),
        }
    }

    /// Append an argument, keeping declaration order
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        if let (StepKind::Transaction, Some(signer)) = (self.kind, &self.signer) {
            write!(f, " ({})", signer)?;
        }
        Ok(())
    }
}

/// An ordered list of steps replayed as one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Load and validate a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a scenario from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(content)
            .map_err(|e| Error::ScenarioParse(format!("Failed to parse scenario: {}", e)))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the structural rules a scenario file must follow
    ///
    /// A transaction without a signer is allowed here; it fails when run.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ScenarioParse("scenario name is empty".to_string()));
        }

        for (i, step) in self.steps.iter().enumerate() {
            let step_num = i + 1;
            if step.name.trim().is_empty() {
                return Err(Error::ScenarioParse(format!(
                    "step {}: operation name is empty",
                    step_num
                )));
            }
            if step.kind == StepKind::Query && step.signer.is_some() {
                return Err(Error::ScenarioParse(format!(
                    "step {}: query '{}' must not have a signer",
                    step_num, step.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_yaml(
            r#"
name: buy-and-check
description: Bob buys eggs
steps:
  - kind: transaction
    name: buy_eggs
    signer: bob
    args:
      amount: "5"
  - kind: query
    name: get_owned_nfts
    args:
      account: bob
"#,
        )
        .unwrap();

        assert_eq!(scenario.name, "buy-and-check");
        assert_eq!(scenario.description.as_deref(), Some("Bob buys eggs"));
        assert_eq!(
            scenario.steps,
            vec![
                Step::transaction("buy_eggs", "bob").arg("amount", "5"),
                Step::query("get_owned_nfts").arg("account", "bob"),
            ]
        );
    }

    #[test]
    fn test_argument_order_is_preserved() {
        let scenario = Scenario::from_yaml(
            r#"
name: phrase
steps:
  - kind: transaction
    name: create_phrase
    signer: bob
    args:
      phrase: Flow-powered and Feline-ready
      base64Img: THIS IS BASE64CODE
      namesOnScreen: '["Axlocity", "KittyCatRightMeow"]'
      catsOnScreen: '["Pride", "Prince"]'
      background: Dawn
"#,
        )
        .unwrap();

        let keys: Vec<&str> = scenario.steps[0].args.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["phrase", "base64Img", "namesOnScreen", "catsOnScreen", "background"]
        );
        assert_eq!(
            scenario.steps[0].args["namesOnScreen"],
            r#"["Axlocity", "KittyCatRightMeow"]"#
        );
    }

    #[test]
    fn test_query_with_signer_is_rejected() {
        let err = Scenario::from_yaml(
            r#"
name: bad
steps:
  - kind: query
    name: get_balance
    signer: bob
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not have a signer"), "{}", err);
    }

    #[test]
    fn test_transaction_without_signer_loads() {
        let scenario = Scenario::from_yaml(
            r#"
name: unsigned
steps:
  - kind: transaction
    name: buy_eggs
"#,
        )
        .unwrap();
        assert_eq!(scenario.steps[0].signer, None);
    }

    #[test]
    fn test_unknown_fields_and_kinds_are_rejected() {
        assert!(Scenario::from_yaml("name: x\nsteps:\n  - kind: deploy\n    name: a\n").is_err());
        assert!(Scenario::from_yaml("name: x\nsteps:\n  - kind: query\n    nme: a\n").is_err());
        assert!(Scenario::from_yaml("name: ''\nsteps: []\n").is_err());
    }

    #[test]
    fn test_empty_step_list() {
        let scenario = Scenario::from_yaml("name: nothing\n").unwrap();
        assert!(scenario.steps.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Step::transaction("open_eggs", "alice").to_string(),
            "tx open_eggs (alice)"
        );
        assert_eq!(Step::query("get_all_phrases").to_string(), "query get_all_phrases");
    }
}
