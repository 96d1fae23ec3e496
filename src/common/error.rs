//! Error types for the scenario runner
//!
//! Only two things can go wrong from a user's point of view: the run cannot
//! be set up (configuration, backend, identities, scenario file), or a step
//! fails. Step failures are not represented here; they are recorded as
//! [`Outcome::Failed`](crate::scenario::Outcome::Failed) and the run goes on.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scenario runner
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Network '{0}' has no gateway endpoint. Set [gateway] endpoint or use 'emulator'")]
    UnknownNetwork(String),

    #[error("Backend for network '{network}' is unreachable: {reason}")]
    BackendUnreachable { network: String, reason: String },

    #[error("Failed to resolve identity '{name}': {reason}")]
    IdentityResolution { name: String, reason: String },

    // === Scenario Errors ===
    #[error("Invalid scenario: {0}")]
    ScenarioParse(String),

    #[error("Unknown scenario '{0}'. Use 'eggwisdom list' to see built-in scenarios")]
    UnknownScenario(String),

    #[error("{failed} of {total} steps failed")]
    ScenarioFailed { failed: usize, total: usize },

    // === Serialization Errors ===
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a backend unreachable error
    pub fn backend_unreachable(network: &str, reason: impl ToString) -> Self {
        Self::BackendUnreachable {
            network: network.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an identity resolution error
    pub fn identity_resolution(name: &str, reason: impl ToString) -> Self {
        Self::IdentityResolution {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error prevents a run from starting at all
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigParse(_)
                | Error::FileRead { .. }
                | Error::UnknownNetwork(_)
                | Error::BackendUnreachable { .. }
                | Error::IdentityResolution { .. }
        )
    }
}
