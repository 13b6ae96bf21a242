use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::SkillCategories;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub profiles: ProfileSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    /// Skill category table; the built-in table is used when empty
    #[serde(default)]
    pub categories: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Profile source: a seed file, or the hosted store when `store` is set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSettings {
    pub seed_path: Option<String>,
    pub store: Option<StoreSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub collection: String,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_wanted_skill_weight")]
    pub wanted_skill: u32,
    #[serde(default = "default_offered_skill_weight")]
    pub offered_skill: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            wanted_skill: default_wanted_skill_weight(),
            offered_skill: default_offered_skill_weight(),
            location: default_location_weight(),
        }
    }
}

fn default_wanted_skill_weight() -> u32 { 70 }
fn default_offered_skill_weight() -> u32 { 20 }
fn default_location_weight() -> u32 { 10 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            wanted_skill: config.wanted_skill,
            offered_skill: config.offered_skill,
            location: config.location,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Text,
}

impl LoggingSettings {
    /// Formatter selected by `format`; unknown values fall back to plain text
    pub fn format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP)
    /// 5. Unprefixed variables (`LOG_LEVEL`, `PROFILE_STORE_API_KEY`, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        Self::build(builder, |name| std::env::var(name).ok())
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.as_ref()));

        Self::build(builder, |name| std::env::var(name).ok())
    }

    fn build<F>(builder: ConfigBuilder<DefaultState>, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = builder
            // e.g., SKILLSWAP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SKILLSWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings, var)?.try_deserialize()
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    /// Configured category table, or the built-in one when none is set
    pub fn skill_categories(&self) -> SkillCategories {
        if self.categories.is_empty() {
            SkillCategories::builtin()
        } else {
            SkillCategories::from_table(self.categories.clone())
        }
    }
}

/// Apply the conventional unprefixed variables
///
/// `PROFILE_STORE_ENDPOINT` and `PROFILE_STORE_API_KEY` only fill in a
/// `[profiles.store]` table that is already configured; on their own they
/// never switch a seed-file deployment over to the store.
fn substitute_env_vars<F>(settings: Config, var: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let has_store = settings.get_table("profiles.store").is_ok();

    let mut builder = Config::builder().add_source(settings);

    if has_store {
        if let Some(endpoint) = var("PROFILE_STORE_ENDPOINT") {
            builder = builder.set_override("profiles.store.endpoint", endpoint)?;
        }
        if let Some(api_key) = var("PROFILE_STORE_API_KEY") {
            builder = builder.set_override("profiles.store.api_key", api_key)?;
        }
    }
    if let Some(path) = var("PROFILE_SEED_PATH") {
        builder = builder.set_override("profiles.seed_path", path)?;
    }
    if let Some(level) = var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Some(format) = var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
