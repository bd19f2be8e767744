//! Application settings, loaded from TOML files with a per-environment
//! overlay and environment-variable overrides.

use marketplace_env::env::Env;
use payment_providers::{client::BillingConfig, registry::ProvidersConfig};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    #[serde(default)]
    pub log: marketplace_env::logger::LogConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub billing: BillingConfig,
    pub search: SearchConfig,
    pub recommendations: RecommendationsConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

/// Elasticsearch connection and query bounds.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchConfig {
    pub es_url: String,
    pub index: String,
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

fn default_limit() -> u32 {
    25
}

fn default_max_limit() -> u32 {
    50
}

fn default_max_query_length() -> usize {
    255
}

#[derive(Clone, Debug, Deserialize)]
pub struct RecommendationsConfig {
    /// Base URL of the recommendation service.
    pub base_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmitConfig {
    /// Enforce the one-app-per-domain rule on submission.
    #[serde(default = "default_unique_by_domain")]
    pub unique_by_domain: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            unique_by_domain: default_unique_by_domain(),
        }
    }
}

fn default_unique_by_domain() -> bool {
    true
}

impl Settings {
    /// Load settings for the current `RUN_ENV`.
    ///
    /// Layering order, later sources win: `config/Default.toml`, the
    /// environment overlay, then `MARKETPLACE__SECTION__KEY` variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::with_env(Env::current())
    }

    pub fn with_env(env: Env) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/Default"))
            .add_source(
                config::File::with_name(&format!("config/{}", env.config_file_name()))
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("MARKETPLACE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
