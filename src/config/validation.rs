//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! collected so a bad config reports all of its errors at once.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{ServiceConfig, WILDCARD_ORIGIN};

/// A single semantic problem in a [`ServiceConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("cors.allowed_origins must not be empty")]
    NoCorsOrigins,

    #[error("cors origin '{origin}' is invalid: {reason}")]
    InvalidOrigin { origin: String, reason: &'static str },

    #[error("cors.allowed_origins mixes '*' with explicit origins")]
    MixedWildcardOrigin,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_level '{0}' is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let origins = &config.cors.allowed_origins;
    if origins.is_empty() {
        errors.push(ValidationError::NoCorsOrigins);
    } else if config.cors.is_wildcard() {
        if origins.len() > 1 {
            errors.push(ValidationError::MixedWildcardOrigin);
        }
    } else {
        for origin in origins {
            if let Err(e) = check_origin(origin) {
                errors.push(e);
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check one explicit origin and convert it to a header value.
pub fn check_origin(origin: &str) -> Result<HeaderValue, ValidationError> {
    let invalid = |reason| ValidationError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };

    if origin == WILDCARD_ORIGIN {
        return Err(invalid("wildcard is not an explicit origin"));
    }
    let authority = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(|| invalid("scheme must be http or https"))?;
    if authority.is_empty() {
        return Err(invalid("missing host"));
    }
    // Browsers send scheme, host and port only.
    if authority.contains(&['/', '?', '#'][..]) {
        return Err(invalid("origin must not contain a path, query or fragment"));
    }
    HeaderValue::from_str(origin).map_err(|_| invalid("not a valid header value"))
}
