//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MockConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

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
///
/// A relative fixture directory is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<MockConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: MockConfig = toml::from_str(&content)?;

    if config.fixtures.dir.is_relative() {
        if let Some(parent) = path.parent() {
            config.fixtures.dir = parent.join(&config.fixtures.dir);
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wpt-mock-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mock.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_resolves_relative_fixture_dir() {
        let path = write_temp(
            r#"
            [fixtures]
            dir = "responses"
            "#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.fixtures.dir, path.parent().unwrap().join("responses"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_rejects_invalid() {
        let path = write_temp(
            r#"
            [server]
            host = "nope"
            bind_address = "nope"
            "#,
        );
        let err = load_config(&path).unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_load_parse_error() {
        let path = write_temp("[server\nhost = ");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}
