//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Environment variables that override file values

/// Overrides `server.bind`
pub const ENV_BIND: &str = "IMGXFORM_BIND";
/// Overrides `fetch.timeout_secs`
pub const ENV_FETCH_TIMEOUT_SECS: &str = "IMGXFORM_FETCH_TIMEOUT_SECS";
/// Overrides `fetch.max_body_bytes`
pub const ENV_MAX_BODY_BYTES: &str = "IMGXFORM_MAX_BODY_BYTES";
/// Overrides `logging.level`
pub const ENV_LOG_LEVEL: &str = "IMGXFORM_LOG_LEVEL";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Effective settings
    pub schema: ConfigSchema,
    /// File the settings were read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults, then apply
    /// environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the standard locations are
    /// tried and defaults are used when none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with a custom environment lookup
    pub fn load_with_env(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema, env)?;

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load with defaults only (no file, no environment)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.schema.server.bind.parse().map_err(|e| {
            Error::config(format!("Invalid bind address {:?}: {e}", self.schema.server.bind))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.schema.fetch.timeout_secs == 0 {
            return Err(Error::config("fetch.timeout_secs cannot be zero"));
        }

        if self.schema.fetch.connect_timeout_secs == 0 {
            return Err(Error::config("fetch.connect_timeout_secs cannot be zero"));
        }

        if self.schema.fetch.max_body_bytes == 0 {
            return Err(Error::config("fetch.max_body_bytes cannot be zero"));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.schema)
            .map_err(|e| Error::config(format!("Failed to render config: {e}")))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["imgxform.toml", ".config/imgxform.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let context = format!("config file {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(context.clone())?;

    toml::from_str(&content).map_err(Error::from).context(context)
}

fn apply_env_overrides(schema: &mut ConfigSchema, env: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(bind) = env(ENV_BIND) {
        schema.server.bind = bind;
    }

    if let Some(value) = env(ENV_FETCH_TIMEOUT_SECS) {
        schema.fetch.timeout_secs = parse_env(ENV_FETCH_TIMEOUT_SECS, &value)?;
    }

    if let Some(value) = env(ENV_MAX_BODY_BYTES) {
        schema.fetch.max_body_bytes = parse_env(ENV_MAX_BODY_BYTES, &value)?;
    }

    if let Some(level) = env(ENV_LOG_LEVEL) {
        schema.logging.level = level;
    }

    Ok(())
}

fn parse_env(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("{key}={value:?} is not a valid integer: {e}")))
}
