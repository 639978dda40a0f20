//! ---
//! plt_section: "01-core-functionality"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Single configuration-loading boundary for the load-test harness."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::error::{ConfigResult, ConfigurationError};
use crate::logging::LogFormat;

/// Deployment topology selector.
pub const ENV_MODE: &str = "MODE";
/// Gateway address (`host:port`) that public traffic is routed through.
pub const ENV_GATEWAY_URL: &str = "API_GATEWAY_URL";
/// Scheme used for gateway traffic, `http` or `https`.
pub const ENV_GATEWAY_PROTOCOL: &str = "API_GATEWAY_PROTOCOL";
/// Absolute path of the checkout holding `integration-test/data`.
pub const ENV_FIXTURE_ROOT: &str = "TEST_FOLDER_ABS_PATH";

fn default_request_timeout() -> Duration {
    Duration::from_secs(300)
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_filter() -> String {
    "info".to_owned()
}

/// Immutable harness configuration, produced once at start-up and threaded
/// explicitly to the resolver and loaders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HarnessConfig {
    #[serde(default)]
    pub target: TargetSettings,
    #[serde(default)]
    pub fixtures: FixtureSettings,
    #[serde(default)]
    pub requests: RequestSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`HarnessConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedHarnessConfig {
    pub config: HarnessConfig,
    /// `None` when no file was found and only the environment was consulted.
    pub source: Option<PathBuf>,
}

impl HarnessConfig {
    pub const ENV_CONFIG_PATH: &str = "PLT_CONFIG";

    /// Build the configuration from the process environment only.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Tests use this to avoid touching process-global state.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overlay(lookup)
    }

    /// Overlay environment-style variables on top of the current values.
    /// Blank variables are treated as unset.
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        if let Some(mode) = read(ENV_MODE) {
            self.target.mode = Some(mode);
        }
        if let Some(url) = read(ENV_GATEWAY_URL) {
            self.target.gateway_url = Some(url);
        }
        if let Some(protocol) = read(ENV_GATEWAY_PROTOCOL) {
            self.target.gateway_protocol = Some(protocol);
        }
        if let Some(root) = read(ENV_FIXTURE_ROOT) {
            self.fixtures.root = Some(PathBuf::from(root));
        }
        self
    }

    /// Load an optional TOML file and overlay the process environment.
    ///
    /// `PLT_CONFIG` wins over `candidates`. When no file exists the defaults
    /// are used as the base layer.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedHarnessConfig> {
        Self::load_with_lookup(candidates, |key| std::env::var(key).ok())
    }

    /// Same as [`HarnessConfig::load_with_source`] with an injectable lookup.
    pub fn load_with_lookup<P, F>(candidates: &[P], lookup: F) -> Result<LoadedHarnessConfig>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let explicit = lookup(Self::ENV_CONFIG_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let source = match explicit {
            Some(path) => Some(path),
            None => candidates
                .iter()
                .map(|candidate| candidate.as_ref())
                .find(|candidate| candidate.exists())
                .map(Path::to_path_buf),
        };
        Self::assemble(source, lookup)
    }

    /// Load exactly `path` and overlay the process environment. `PLT_CONFIG`
    /// is not consulted.
    pub fn load_file(path: &Path) -> Result<LoadedHarnessConfig> {
        Self::load_file_with_lookup(path, |key| std::env::var(key).ok())
    }

    /// Same as [`HarnessConfig::load_file`] with an injectable lookup.
    pub fn load_file_with_lookup<F>(path: &Path, lookup: F) -> Result<LoadedHarnessConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::assemble(Some(path.to_path_buf()), lookup)
    }

    fn assemble<F>(source: Option<PathBuf>, lookup: F) -> Result<LoadedHarnessConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match &source {
            Some(path) => Self::from_path(path)?,
            None => {
                debug!("no configuration file found; using environment only");
                Self::default()
            }
        };
        let config = base.overlay(lookup);
        config.validate()?;
        Ok(LoadedHarnessConfig { config, source })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        toml::from_str::<HarnessConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Validate structural invariants that do not depend on resolution.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(url) = &self.target.gateway_url {
            if url.trim().is_empty() {
                return Err(ConfigurationError::EmptyGatewayUrl);
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for HarnessConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: HarnessConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Raw target selection. Values stay as strings here; the endpoint resolver
/// owns their interpretation and rejects anything it does not recognise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetSettings {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub gateway_url: Option<String>,
    #[serde(default)]
    pub gateway_protocol: Option<String>,
}

impl TargetSettings {
    /// Presence of a gateway URL switches the gateway resolver to override mode.
    pub fn gateway_override(&self) -> bool {
        self.gateway_url.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureSettings {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl FixtureSettings {
    pub fn require_root(&self) -> ConfigResult<&Path> {
        self.root
            .as_deref()
            .ok_or(ConfigurationError::MissingFixtureRoot)
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestSettings {
    #[serde(default = "default_request_timeout")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Filter directive used when neither `PLT_LOG` nor `RUST_LOG` is set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            filter: default_log_filter(),
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn blank_variables_are_unset() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_MODE, "   "),
            (ENV_GATEWAY_URL, ""),
            (ENV_GATEWAY_PROTOCOL, "https"),
        ]));
        assert_eq!(config.target.mode, None);
        assert!(!config.target.gateway_override());
        assert_eq!(config.target.gateway_protocol.as_deref(), Some("https"));
    }

    #[test]
    fn fixture_root_is_required_on_demand() {
        let config = HarnessConfig::default();
        assert_eq!(
            config.fixtures.require_root(),
            Err(ConfigurationError::MissingFixtureRoot)
        );
        let config = HarnessConfig::from_lookup(lookup(&[(ENV_FIXTURE_ROOT, "/srv/loadtest")]));
        assert_eq!(
            config.fixtures.require_root().unwrap(),
            Path::new("/srv/loadtest")
        );
    }

    #[test]
    fn request_timeout_defaults_to_five_minutes() {
        assert_eq!(
            RequestSettings::default().timeout,
            Duration::from_secs(300)
        );
    }
}
