//! Outpost configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use outpost_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("model: {}", config.model.id);
//! ```

pub mod error;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use error::ConfigError;
pub use schema::OutpostConfig;
pub use toml_loader::{default_config_path, load_from_path};

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<OutpostConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
