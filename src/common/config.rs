//! Configuration file handling

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Name of the identity that owns the Egg Wisdom contract
pub const CONTRACT_ACCOUNT: &str = "account";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Network the scenario runs against
    #[serde(default)]
    pub network: Network,

    /// Console output settings
    #[serde(default)]
    pub print: PrintOptions,

    /// HTTP gateway settings (non-emulator networks)
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// In-process emulator settings
    #[serde(default)]
    pub emulator: EmulatorConfig,

    /// Identity registry, keyed by the short name used in scenarios
    #[serde(default)]
    pub identities: IndexMap<String, IdentityConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            print: PrintOptions::default(),
            gateway: GatewayConfig::default(),
            emulator: EmulatorConfig::default(),
            identities: default_identities(),
        }
    }
}

/// Target network
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Network {
    /// Local in-process emulator
    #[default]
    Emulator,
    Testnet,
    Mainnet,
    /// Any other network reachable through the gateway
    Custom(String),
}

impl Network {
    pub fn is_emulator(&self) -> bool {
        matches!(self, Network::Emulator)
    }
}

impl From<String> for Network {
    fn from(s: String) -> Self {
        Network::from(s.as_str())
    }
}

impl From<&str> for Network {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "emulator" | "local" => Network::Emulator,
            "testnet" => Network::Testnet,
            "mainnet" => Network::Mainnet,
            other => Network::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Emulator => write!(f, "emulator"),
            Network::Testnet => write!(f, "testnet"),
            Network::Mainnet => write!(f, "mainnet"),
            Network::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Console output settings
#[derive(Debug, Deserialize, Clone)]
pub struct PrintOptions {
    /// Print each step's arguments
    #[serde(default)]
    pub arguments: bool,

    /// Print the payload of successful steps
    #[serde(default = "default_true")]
    pub payloads: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            arguments: false,
            payloads: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// HTTP gateway settings
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway, e.g. `http://127.0.0.1:8888`
    pub endpoint: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Emulator pricing, in whole ZEN
#[derive(Debug, Deserialize, Clone)]
pub struct EmulatorConfig {
    #[serde(default = "default_egg_price")]
    pub egg_price: u64,

    #[serde(default = "default_phrase_fee")]
    pub phrase_fee: u64,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            egg_price: default_egg_price(),
            phrase_fee: default_phrase_fee(),
        }
    }
}

fn default_egg_price() -> u64 {
    10
}
fn default_phrase_fee() -> u64 {
    5
}

/// One entry of the identity registry
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Account address (hex, `0x`-prefixed)
    pub address: Option<String>,

    /// Key reference handed to the backend for signing
    pub key: Option<String>,

    /// Starting balance on the emulator
    pub balance: Option<u64>,
}

/// Identities every scenario can rely on
fn default_identities() -> IndexMap<String, IdentityConfig> {
    let mut identities = IndexMap::new();
    identities.insert(
        CONTRACT_ACCOUNT.to_string(),
        IdentityConfig {
            address: Some("0xf8d6e0586b0a20c7".to_string()),
            key: None,
            balance: Some(0),
        },
    );
    identities.insert(
        "bob".to_string(),
        IdentityConfig {
            address: Some("0x179b6b1cb6755e31".to_string()),
            key: None,
            balance: Some(1_000),
        },
    );
    identities.insert(
        "alice".to_string(),
        IdentityConfig {
            address: Some("0x01cf0e2f2f715450".to_string()),
            key: None,
            balance: Some(1_000),
        },
    );
    identities
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// used when present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration text
    ///
    /// Configured identities override the built-in ones of the same name;
    /// built-in identities not mentioned are kept.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;

        for (name, identity) in default_identities() {
            config.identities.entry(name).or_insert(identity);
        }
        Ok(config)
    }
}
