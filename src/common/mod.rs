//! Shared configuration, errors and logging

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::{Config, IdentityConfig, Network, PrintOptions};
pub use error::{Error, Result};
