//! Execution backends
//!
//! A backend is everything on the far side of the runner: it builds, signs
//! and submits transactions, evaluates queries, and turns identity names into
//! credentials. The runner only sees this trait.

mod emulator;
mod gateway;

pub use emulator::EmulatorBackend;
pub use gateway::GatewayBackend;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::common::{Config, Error, IdentityConfig, Network, Result};
use crate::scenario::Arguments;

/// A resolved identity, ready to authorize transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    /// Short name used in scenarios, e.g. `bob`
    pub name: String,
    /// Account address
    pub address: String,
    /// Key reference for the signer, if the backend needs one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Why a backend call did not succeed
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("operation '{operation}' is missing argument '{argument}'")]
    MissingArgument { operation: String, argument: String },

    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid identity '{name}': {reason}")]
    InvalidIdentity { name: String, reason: String },
}

impl BackendError {
    pub fn missing_argument(operation: &str, argument: &str) -> Self {
        Self::MissingArgument {
            operation: operation.to_string(),
            argument: argument.to_string(),
        }
    }

    pub fn invalid_argument(argument: &str, reason: impl ToString) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The boundary the scenario runner executes against
#[async_trait]
pub trait Backend: Send + Sync {
    /// Check that the backend can serve `network`
    async fn connect(&self, network: &Network) -> std::result::Result<(), BackendError>;

    /// Turn a registry entry into a credential
    async fn resolve_identity(
        &self,
        name: &str,
        identity: &IdentityConfig,
    ) -> std::result::Result<Credential, BackendError>;

    /// Build, sign and submit a transaction
    async fn submit_transaction(
        &self,
        name: &str,
        signer: &Credential,
        args: &Arguments,
    ) -> std::result::Result<Value, BackendError>;

    /// Evaluate a read-only script
    async fn evaluate_query(
        &self,
        name: &str,
        args: &Arguments,
    ) -> std::result::Result<Value, BackendError>;
}

/// Pick the backend for the configured network
pub fn from_config(config: &Config) -> Result<Arc<dyn Backend>> {
    match &config.network {
        Network::Emulator => Ok(Arc::new(EmulatorBackend::new(config))),
        network => {
            let endpoint = config
                .gateway
                .endpoint
                .as_deref()
                .ok_or_else(|| Error::UnknownNetwork(network.to_string()))?;
            let backend = GatewayBackend::new(endpoint, config.gateway.timeout_secs)
                .map_err(|e| Error::Config(e.to_string()))?;
            Ok(Arc::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emulator_needs_no_endpoint() {
        assert!(from_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_remote_network_needs_endpoint() {
        let config = Config {
            network: Network::Testnet,
            ..Config::default()
        };
        let err = from_config(&config).err().unwrap();
        assert!(matches!(err, Error::UnknownNetwork(ref n) if n == "testnet"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_error_messages_name_the_operation() {
        assert_eq!(
            BackendError::UnknownOperation("hatch_eggs".into()).to_string(),
            "unknown operation 'hatch_eggs'"
        );
        assert_eq!(
            BackendError::missing_argument("buy_eggs", "amount").to_string(),
            "operation 'buy_eggs' is missing argument 'amount'"
        );
    }
}
