//! Configuration validation.
//!
//! Validates generation-parameter ranges and the logging level,
//! collecting all errors into one message.

use crate::error::ConfigError;
use crate::schema::OutpostConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &OutpostConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if config.model.id.trim().is_empty() {
        errors.push("model.id must not be empty".into());
    }
    validate_range_f64(&mut errors, "model.temperature", config.model.temperature, 0.0, 2.0);
    validate_range_f64(&mut errors, "model.top_p", config.model.top_p, 0.0, 1.0);
    if config.model.max_tokens == 0 || config.model.max_tokens > 32768 {
        errors.push(format!(
            "model.max_tokens must be 1-32768, got {}",
            config.model.max_tokens
        ));
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level must be one of {LOG_LEVELS:?}, got '{}'",
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range_f64(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) || !value.is_finite() {
        errors.push(format!("{field} must be {min}-{max}, got {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&OutpostConfig::default()).is_ok());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let mut config = OutpostConfig::default();
        config.model.temperature = 2.5;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("model.temperature"));
    }

    #[test]
    fn zero_max_tokens_rejected() {
        let mut config = OutpostConfig::default();
        config.model.max_tokens = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn unknown_log_level_rejected() {
        let mut config = OutpostConfig::default();
        config.logging.level = "verbose".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn all_errors_collected() {
        let mut config = OutpostConfig::default();
        config.model.id = "".into();
        config.model.top_p = 1.5;
        config.model.temperature = -1.0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("model.id"));
        assert!(err.contains("model.top_p"));
        assert!(err.contains("model.temperature"));
    }
}
