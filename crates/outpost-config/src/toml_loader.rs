//! TOML config file loading and creation.

use std::path::Path;

use tracing::{info, warn};

use crate::error::ConfigError;
use crate::schema::OutpostConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<OutpostConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: OutpostConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    // Validate and warn on errors, but still return a usable config
    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(OutpostConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/outpost/config.toml`
/// On Linux: `~/.config/outpost/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<OutpostConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(OutpostConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("outpost").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    r##"# Outpost Configuration
# Only override what you want to change -- missing fields use defaults.

[model]
# id = "llama3-8b-8192"
# temperature = 1.0      # 0.0-2.0
# max_tokens = 1024      # 1-32768
# top_p = 1.0            # 0.0-1.0
# stream = true

[keys]
# Path to a JSON key file with a "groq" field. When unset, GROQ_API_KEY
# and then ~/.config/outpost/keys.json are tried.
# file = "/path/to/keys.json"

[transcript]
# enabled = true
# path = "chat_log.txt"

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let result = load_from_path(Path::new("/tmp/nonexistent_outpost_config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[model]
id = "m1"
max_tokens = 512

[transcript]
path = "story.log"
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.model.id, "m1");
        assert_eq!(config.model.max_tokens, 512);
        assert_eq!(config.transcript.path.to_str(), Some("story.log"));
        // Defaults preserved
        assert_eq!(config.model.temperature, 1.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn load_config_with_invalid_values_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[model]
temperature = 9.0
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        // Should fall back to default since validation fails
        assert_eq!(config.model.temperature, 1.0);
    }

    #[test]
    fn loading_twice_yields_identical_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[model]\nid = \"m1\"\ntemperature = 1.0\n").unwrap();

        let first = load_from_path(&path).unwrap();
        let second = load_from_path(&path).unwrap();
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn create_and_load_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outpost").join("config.toml");

        create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.model.id, "llama3-8b-8192");
    }

    #[test]
    fn default_config_toml_is_valid() {
        let config: OutpostConfig = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.model.max_tokens, 1024);
    }

    #[test]
    fn default_config_path_is_reasonable() {
        if let Ok(path) = default_config_path() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains("outpost"));
            assert!(path_str.ends_with("config.toml"));
        }
    }
}
