//! Hook configuration
//!
//! Values are layered: command-line flag, then environment variable (both
//! resolved by clap), then the TOML file, then built-in defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bunny_dns_provider::{
    AuthenticatorConfig, BunnyCredentials, DEFAULT_API_BASE, DEFAULT_CHALLENGE_TTL, mask_secret,
};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BUNNY_DNS_CONFIG";

/// Default wait after publishing, in seconds.
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "no bunny.net access key configured (use --access-key, BUNNY_ACCESS_KEY or `access_key` in the config file)"
    )]
    MissingAccessKey,
}

/// Contents of `config.toml`.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookConfig {
    #[serde(default, alias = "AccessKey")]
    pub access_key: Option<String>,
    #[serde(default = "default_propagation_seconds")]
    pub propagation_seconds: u64,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_propagation_seconds() -> u64 {
    DEFAULT_PROPAGATION_SECONDS
}

fn default_ttl() -> u32 {
    DEFAULT_CHALLENGE_TTL
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            propagation_seconds: default_propagation_seconds(),
            ttl: default_ttl(),
            api_base: default_api_base(),
        }
    }
}

impl fmt::Debug for HookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookConfig")
            .field("access_key", &self.access_key.as_deref().map(mask_secret))
            .field("propagation_seconds", &self.propagation_seconds)
            .field("ttl", &self.ttl)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Values that take precedence over the file.
#[derive(Default)]
pub struct ConfigOverrides {
    pub access_key: Option<String>,
    pub api_base: Option<String>,
    pub propagation_seconds: Option<u64>,
    pub ttl: Option<u32>,
}

/// Fully resolved settings for one hook invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: BunnyCredentials,
    pub authenticator: AuthenticatorConfig,
    pub propagation: Duration,
}

impl HookConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config file.
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => {
                    tracing::debug!("No config directory on this platform, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !required && !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        warn_if_readable_by_others(&path);

        let config = Self::from_toml_str(&content, &path)?;
        tracing::debug!("Loaded {config:?} from {}", path.display());
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(key) = overrides.access_key {
            self.access_key = Some(key);
        }
        if let Some(api_base) = overrides.api_base {
            self.api_base = api_base;
        }
        if let Some(seconds) = overrides.propagation_seconds {
            self.propagation_seconds = seconds;
        }
        if let Some(ttl) = overrides.ttl {
            self.ttl = ttl;
        }
    }

    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let access_key = self
            .access_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingAccessKey)?;

        Ok(Settings {
            credentials: BunnyCredentials::new(access_key).with_api_base(self.api_base),
            authenticator: AuthenticatorConfig { ttl: self.ttl },
            propagation: Duration::from_secs(self.propagation_seconds),
        })
    }
}

/// `<config_dir>/bunny-dns/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bunny-dns").join("config.toml"))
}

/// Group or other permission bits set.
fn is_too_permissive(mode: u32) -> bool {
    mode & 0o077 != 0
}

#[cfg(unix)]
fn warn_if_readable_by_others(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if is_too_permissive(mode) {
            tracing::warn!(
                "Config file {} holds an access key but has mode {:o}; consider chmod 600",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_readable_by_others(_path: &Path) {}
