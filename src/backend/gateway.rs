//! HTTP gateway backend
//!
//! Talks JSON to a gateway service that owns the keys and the chain
//! connection. Every reply uses the same envelope:
//!
//! ```json
//! { "success": true, "result": { ... } }
//! { "success": false, "error": { "code": "REJECTED", "message": "..." } }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::common::{IdentityConfig, Network};
use crate::scenario::Arguments;

use super::{Backend, BackendError, Credential};

type BackendResult<T> = std::result::Result<T, BackendError>;

/// Backend that forwards steps to an HTTP gateway
pub struct GatewayBackend {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct TransactionRequest<'a> {
    name: &'a str,
    signer: &'a Credential,
    arguments: &'a Arguments,
}

#[derive(Serialize)]
struct ScriptRequest<'a> {
    name: &'a str,
    arguments: &'a Arguments,
}

#[derive(Deserialize)]
struct Reply {
    success: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ReplyError>,
}

#[derive(Deserialize)]
struct ReplyError {
    code: String,
    message: String,
}

impl Reply {
    fn into_result(self, operation: &str) -> BackendResult<Value> {
        if self.success {
            return Ok(self.result.unwrap_or(Value::Null));
        }
        let error = self.error.unwrap_or(ReplyError {
            code: "UNKNOWN".to_string(),
            message: "gateway reported failure without details".to_string(),
        });
        match error.code.as_str() {
            "UNKNOWN_OPERATION" => Err(BackendError::UnknownOperation(operation.to_string())),
            _ => Err(BackendError::Rejected(error.message)),
        }
    }
}

impl GatewayBackend {
    pub fn new(endpoint: &str, timeout_secs: u64) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("eggwisdom")
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    async fn post<T: Serialize>(&self, path: &str, operation: &str, body: &T) -> BackendResult<Value> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let reply: Reply = response.json().await.map_err(|e| {
            BackendError::Transport(format!("invalid gateway reply (HTTP {}): {}", status, e))
        })?;
        reply.into_result(operation)
    }
}

fn map_send_error(e: reqwest::Error) -> BackendError {
    if e.is_connect() || e.is_timeout() {
        BackendError::Unreachable(e.to_string())
    } else {
        BackendError::Transport(e.to_string())
    }
}

#[async_trait]
impl Backend for GatewayBackend {
    async fn connect(&self, network: &Network) -> BackendResult<()> {
        let response = self
            .client
            .get(self.url("health"))
            .query(&[("network", network.to_string())])
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(BackendError::Unreachable(format!(
                "health check returned HTTP {}",
                response.status()
            )));
        }
        tracing::debug!(endpoint = %self.endpoint, %network, "Gateway is healthy");
        Ok(())
    }

    async fn resolve_identity(
        &self,
        name: &str,
        identity: &IdentityConfig,
    ) -> BackendResult<Credential> {
        let address = identity.address.clone().ok_or_else(|| BackendError::InvalidIdentity {
            name: name.to_string(),
            reason: "no address configured".to_string(),
        })?;

        Ok(Credential {
            name: name.to_string(),
            address,
            key: identity.key.clone(),
        })
    }

    async fn submit_transaction(
        &self,
        name: &str,
        signer: &Credential,
        args: &Arguments,
    ) -> BackendResult<Value> {
        let request = TransactionRequest {
            name,
            signer,
            arguments: args,
        };
        self.post("transactions", name, &request).await
    }

    async fn evaluate_query(&self, name: &str, args: &Arguments) -> BackendResult<Value> {
        let request = ScriptRequest {
            name,
            arguments: args,
        };
        self.post("scripts", name, &request).await
    }
}
