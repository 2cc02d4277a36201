//! Start-up configuration.
//!
//! Read once from the environment, then optionally overridden by CLI flags.

use std::path::PathBuf;

use thiserror::Error;

use quotekit_catalog::Catalog;
use quotekit_observability::LogFormat;
use quotekit_quote::SelectionMode;

pub const ENV_SELECTION_MODE: &str = "QUOTEKIT_SELECTION_MODE";
pub const ENV_CATALOG_PATH: &str = "QUOTEKIT_CATALOG_PATH";
pub const ENV_LOG_FORMAT: &str = "QUOTEKIT_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    InvalidValue { var: &'static str, message: String },

    #[error("cannot read catalog file {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog file {path} is invalid: {source}")]
    CatalogInvalid {
        path: PathBuf,
        #[source]
        source: quotekit_core::DomainError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub selection_mode: SelectionMode,
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let selection_mode = match get(ENV_SELECTION_MODE) {
            Some(raw) => raw.parse::<SelectionMode>().map_err(|e| ConfigError::InvalidValue {
                var: ENV_SELECTION_MODE,
                message: format!("{e}"),
            })?,
            None => SelectionMode::default(),
        };

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| ConfigError::InvalidValue {
                var: ENV_LOG_FORMAT,
                message: format!("{e}"),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            selection_mode,
            catalog_path: get(ENV_CATALOG_PATH).map(PathBuf::from),
            log_format,
        })
    }

    /// The configured catalog file, or the built-in catalog.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::standard());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogIo {
            path: path.clone(),
            source,
        })?;
        let catalog = Catalog::from_json(&json).map_err(|source| ConfigError::CatalogInvalid {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), products = catalog.len(), "loaded catalog file");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.selection_mode, SelectionMode::Replace);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            (ENV_SELECTION_MODE, "accumulate"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_CATALOG_PATH, "/etc/quotekit/catalog.json"),
        ]))
        .unwrap();
        assert_eq!(config.selection_mode, SelectionMode::Accumulate);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/quotekit/catalog.json"))
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ConsoleConfig::from_lookup(lookup(&[(ENV_SELECTION_MODE, "  ")])).unwrap();
        assert_eq!(config.selection_mode, SelectionMode::Replace);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = ConsoleConfig::from_lookup(lookup(&[(ENV_SELECTION_MODE, "sometimes")]))
            .unwrap_err();
        assert!(err.to_string().starts_with(ENV_SELECTION_MODE));
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = ConsoleConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/quotekit/catalog.json")),
            ..ConsoleConfig::default()
        };
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::CatalogIo { .. })
        ));
    }

    #[test]
    fn catalog_file_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("catalog.json");
        std::fs::write(
            &good,
            r#"[{"name":"Clinical","products":[{"id":"a","name":"Alpha"}]}]"#,
        )
        .unwrap();
        let config = ConsoleConfig {
            catalog_path: Some(good),
            ..ConsoleConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);

        let dup = dir.path().join("dup.json");
        std::fs::write(
            &dup,
            r#"[{"name":"C","products":[{"id":"a","name":"A"},{"id":"a","name":"B"}]}]"#,
        )
        .unwrap();
        let config = ConsoleConfig {
            catalog_path: Some(dup.clone()),
            ..ConsoleConfig::default()
        };
        match config.load_catalog() {
            Err(ConfigError::CatalogInvalid { path, source }) => {
                assert_eq!(path, dup);
                assert!(matches!(source, quotekit_core::DomainError::InvariantViolation(_)));
            }
            other => panic!("expected CatalogInvalid, got {other:?}"),
        }
    }

    #[test]
    fn built_in_catalog_without_path() {
        let catalog = ConsoleConfig::default().load_catalog().unwrap();
        assert_eq!(catalog, Catalog::standard());
    }
}
