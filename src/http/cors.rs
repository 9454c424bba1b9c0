//! Cross-origin policy.
//!
//! # Modes
//! - Wildcard origin, no credentials: `*` for origin, methods and headers.
//! - Wildcard origin with credentials: the request's origin, method and
//!   headers are mirrored back, since `*` is not allowed on credentialed
//!   responses.
//! - Explicit origins: only listed origins are allowed; methods and headers
//!   are mirrored.

use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::validation::check_origin;
use crate::config::{CorsConfig, ValidationError};

/// Build the CORS layer for a policy.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, ValidationError> {
    if config.is_wildcard() {
        if config.allow_credentials {
            return Ok(CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true));
        }
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| check_origin(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_builds() {
        assert!(cors_layer(&CorsConfig::default()).is_ok());
    }

    #[test]
    fn test_wildcard_with_credentials_builds() {
        let config = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(cors_layer(&config).is_ok());
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:5173".into(), "example.com".into()],
            allow_credentials: true,
        };
        let err = cors_layer(&config).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidOrigin { ref origin, .. } if origin == "example.com"
        ));
    }
}
