//! Application configuration.
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then `RETAG_*` environment variables. Nested keys use a double underscore,
//! e.g. `RETAG_REGISTRY__URL` or `RETAG_NETWORK__TIMEOUT`.

use crate::error::{Result, RetagError};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "RETAG";

/// Environment variables used in place of the process environment.
pub type EnvOverrides = config::Map<String, String>;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub network: Network,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    ///
    /// This function is primarily used for testing.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(s, FileFormat::Yaml));
        Self::from_builder(builder)
    }

    /// Loads a `Config` from an optional file path and the process environment.
    ///
    /// A given path must exist. Without a path only defaults and environment
    /// overrides apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Config::load`], reading overrides from `env` instead of the
    /// process environment when it is provided.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<EnvOverrides>,
    ) -> Result<Self> {
        let mut builder = Self::defaults()?;

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = Self::from_builder(builder).map_err(|e| match (e, path) {
            (RetagError::Config { message, source, .. }, Some(p)) => RetagError::Config {
                message,
                path: Some(p.display().to_string()),
                source,
            },
            (e, _) => e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.network.timeout == 0 {
            return Err(RetagError::config(
                "network.timeout must be greater than zero",
                None,
            ));
        }
        if self.registry.url.trim().is_empty() {
            return Err(RetagError::config("registry.url cannot be empty", None));
        }
        if self.registry.auth_url.trim().is_empty() {
            return Err(RetagError::config("registry.auth_url cannot be empty", None));
        }
        Ok(())
    }

    /// Starts a builder seeded with the default values.
    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = ConfigRs::try_from(&Config::default()).map_err(|e| {
            RetagError::config_with_source("Failed to load default configuration", None, e)
        })?;
        Ok(ConfigRs::builder().add_source(defaults))
    }

    /// Creates a `Config` from a `config::ConfigBuilder`.
    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                RetagError::config_with_source(
                    "Failed to deserialize configuration",
                    None,
                    e,
                )
            })
    }
}

/// Registry endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registry {
    /// Base URL of the registry API (without `/v2`)
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Token service endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// `service` parameter sent to the token endpoint
    #[serde(default = "default_service")]
    pub service: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            auth_url: default_auth_url(),
            service: default_service(),
        }
    }
}

fn default_registry_url() -> String {
    "https://index.docker.io".to_string()
}

fn default_auth_url() -> String {
    "https://auth.docker.io/token".to_string()
}

fn default_service() -> String {
    "registry.docker.io".to_string()
}

/// Network settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Per-request timeout in seconds
    #[serde(default = "default_network_timeout")]
    pub timeout: u64,

    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            timeout: default_network_timeout(),
            max_idle_per_host: default_max_idle_per_host(),
        }
    }
}

fn default_network_timeout() -> u64 {
    30
}

fn default_max_idle_per_host() -> usize {
    10
}
