//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → config file (TOML, optional)
//!     → environment (.env and process env)
//!     → command-line flags
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Environment lookups are injected so overrides are testable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, apply_port_override, load_config, load_layered,
    CliOverrides, ConfigError,
};
pub use schema::{
    AppConfig, CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
