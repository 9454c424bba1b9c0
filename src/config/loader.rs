//! Configuration loading from disk and the environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::fs;

use thiserror::Error;

use crate::config::schema::{LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let config = read_config_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Command-line overrides, the last configuration layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub log_format: Option<LogFormat>,
}

/// Build a configuration from defaults, an optional file, environment
/// overrides, then command-line overrides. The result is not validated.
///
/// `PORT` is merged only when no bind address was given on the command
/// line, since `--bind` replaces the whole address.
pub fn load_layered<F>(
    path: Option<&Path>,
    lookup: F,
    cli: CliOverrides,
) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ServiceConfig::default(),
    };
    apply_env_overrides(&mut config, &lookup)?;
    if cli.bind.is_none() {
        apply_port_override(&mut config, &lookup)?;
    }
    apply_cli_overrides(&mut config, cli.bind, cli.log_format);
    Ok(config)
}

/// Apply command-line flags. Each given flag replaces the value from every
/// earlier layer.
pub fn apply_cli_overrides(
    config: &mut ServiceConfig,
    bind: Option<String>,
    log_format: Option<LogFormat>,
) {
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }
    if let Some(format) = log_format {
        config.observability.log_format = format;
    }
}

fn read_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment variable overrides.
///
/// Recognised variables: `ENV`, `CORS_ORIGINS`, `CORS_ALLOW_CREDENTIALS`,
/// `BIND_ADDRESS`, `LOG_LEVEL`, `LOG_FORMAT`. `PORT` is handled separately by
/// [`apply_port_override`].
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(env) = lookup("ENV") {
        config.app.env = env;
    }

    if let Some(raw) = lookup("CORS_ORIGINS") {
        config.cors.allowed_origins = parse_origin_list(&raw).map_err(|reason| ConfigError::Env {
            name: "CORS_ORIGINS",
            reason,
        })?;
    }

    if let Some(raw) = lookup("CORS_ALLOW_CREDENTIALS") {
        config.cors.allow_credentials = parse_bool(&raw).ok_or_else(|| ConfigError::Env {
            name: "CORS_ALLOW_CREDENTIALS",
            reason: format!("'{}' is not a boolean", raw),
        })?;
    }

    if let Some(addr) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }

    if let Some(raw) = lookup("LOG_FORMAT") {
        config.observability.log_format = raw
            .parse()
            .map_err(|reason| ConfigError::Env { name: "LOG_FORMAT", reason })?;
    }

    Ok(())
}

/// Apply `PORT`, replacing only the port of the current bind address.
pub fn apply_port_override<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("PORT") {
        let port: u16 = raw.trim().parse().map_err(|_| ConfigError::Env {
            name: "PORT",
            reason: format!("'{}' is not a port number", raw),
        })?;
        let mut addr: SocketAddr = config.listener.bind_address.parse().map_err(|_| ConfigError::Env {
            name: "PORT",
            reason: format!(
                "bind address '{}' is not a socket address",
                config.listener.bind_address
            ),
        })?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }
    Ok(())
}

/// Parse an origin list given either as a JSON array or comma-separated.
pub fn parse_origin_list(raw: &str) -> Result<Vec<String>, String> {
    let trimmed = raw.trim();
    let origins: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| format!("invalid JSON list: {}", e))?
    } else {
        trimmed.split(',').map(|s| s.trim().to_string()).collect()
    };

    Ok(origins.into_iter().filter(|o| !o.is_empty()).collect())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
