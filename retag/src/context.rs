//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables (`RETAG_*`)
//! 4. CLI flags
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::format::{ColorChoice, OutputFormat};
use libretag::Config;
use libretag::config::EnvOverrides;
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Log verbosity selected with `-v` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    Quiet,
    Info,
    Debug,
    Trace,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Quiet,
            1 => VerbosityLevel::Info,
            2 => VerbosityLevel::Debug,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn as_filter(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "warn",
            VerbosityLevel::Info => "info",
            VerbosityLevel::Debug => "debug",
            VerbosityLevel::Trace => "trace",
        }
    }
}

/// Values taken from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Explicit `--config` path, which must exist
    pub config_path: Option<PathBuf>,
    pub registry: Option<String>,
    pub auth_url: Option<String>,
    pub timeout: Option<u64>,
    pub color: ColorChoice,
    pub format: OutputFormat,
    pub verbosity: VerbosityLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: None,
            registry: None,
            auth_url: None,
            timeout: None,
            color: ColorChoice::Auto,
            format: OutputFormat::Pretty,
            verbosity: VerbosityLevel::Quiet,
        }
    }
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    /// Build context with precedence: defaults < config file < env vars < CLI flags
    pub fn build(settings: &Settings) -> libretag::Result<Self> {
        Self::build_with_env(settings, default_config_path().as_deref(), None)
    }

    /// Like [`AppContext::build`], with an explicit fallback config path and
    /// environment.
    pub fn build_with_env(
        settings: &Settings,
        fallback_path: Option<&Path>,
        env: Option<EnvOverrides>,
    ) -> libretag::Result<Self> {
        // 1-3. Defaults, config file and environment
        let path = config_file(settings.config_path.as_deref(), fallback_path);
        let mut config = Config::load_with_env(path.as_deref(), env)?;

        // 4. CLI flag overrides (highest priority)
        if let Some(url) = &settings.registry {
            config.registry.url = url.clone();
        }
        if let Some(url) = &settings.auth_url {
            config.registry.auth_url = url.clone();
        }
        if let Some(timeout) = settings.timeout {
            config.network.timeout = timeout;
        }
        config.validate()?;

        Ok(Self {
            config,
            format: settings.format,
        })
    }
}

/// Picks the config file to load. An explicit path is always used; the
/// fallback only when it exists.
fn config_file(explicit: Option<&Path>, fallback: Option<&Path>) -> Option<PathBuf> {
    match (explicit, fallback) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(path)) if path.is_file() => Some(path.to_path_buf()),
        _ => None,
    }
}

/// Default config file location, `~/.config/retag/config.yaml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("retag").join("config.yaml"))
}
