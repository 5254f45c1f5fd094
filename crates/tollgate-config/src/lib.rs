#![allow(clippy::must_use_candidate)]

pub mod console;
mod env;
mod loader;
pub mod server;
pub mod upstream;

use serde::Deserialize;

pub use console::ConsoleConfig;
pub use server::{HealthConfig, ServerConfig};
pub use upstream::UpstreamConfig;

/// Top-level tollgate configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Admin-console internal API (token resolution, catalog, balances, ledger)
    pub console: ConsoleConfig,
    /// Upstream AI provider configuration
    pub upstream: UpstreamConfig,
}
