use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

/// Mock fetch boundary configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Simulated network latency in milliseconds. Default: 300.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Page size when the query does not specify one. Default: 20.
    #[serde(default = "default_per_page")]
    pub default_per_page: u64,
    /// Upper bound on the requested page size. Default: 100.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u64,
}

fn default_latency_ms() -> u64 {
    300
}
fn default_per_page() -> u64 {
    20
}
fn default_max_per_page() -> u64 {
    100
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

/// Seed-data generation configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// RNG seed. Same seed, same collections. Default: 42.
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
    /// Submissions generated per user. Default: 4.
    #[serde(default = "default_submissions_per_user")]
    pub submissions_per_user: u32,
}

fn default_rng_seed() -> u64 {
    42
}
fn default_submissions_per_user() -> u32 {
    4
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            rng_seed: default_rng_seed(),
            submissions_per_user: default_submissions_per_user(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let s = Config::builder()
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., DATABOARD__FETCH__LATENCY_MS)
            .add_source(Environment::with_prefix("DATABOARD").separator("__"))
            .build()?;

        Ok(s.try_deserialize()?)
    }
}
