//! Importer configuration, read from the environment.

use std::path::PathBuf;

use crate::error::AppError;

/// Pool size used when `DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// `PostgreSQL` connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Path of the YAML question pack (`QUESTIONS_PATH`).
    pub questions_path: PathBuf,
    /// Connection pool size (`DB_MAX_CONNECTIONS`).
    pub max_connections: u32,
}

impl ImportConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a value
    /// does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
        };

        let database_url = required("DATABASE_URL")?;
        let questions_path = PathBuf::from(required("QUESTIONS_PATH")?);
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::Config(format!("DB_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(AppError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            questions_path,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_settings() {
        // Arrange
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/millionaire"),
            ("QUESTIONS_PATH", "data/questions.yaml"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]);

        // Act
        let config = ImportConfig::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(config.database_url, "postgres://localhost/millionaire");
        assert_eq!(config.questions_path, PathBuf::from("data/questions.yaml"));
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_from_lookup_defaults_pool_size() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/millionaire"),
            ("QUESTIONS_PATH", "pack.yaml"),
        ]);

        let config = ImportConfig::from_lookup(lookup).unwrap();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_from_lookup_requires_database_url() {
        let lookup = lookup_from(&[("QUESTIONS_PATH", "pack.yaml")]);

        let result = ImportConfig::from_lookup(lookup);

        match result {
            Err(AppError::Config(message)) => assert!(message.contains("DATABASE_URL")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_lookup_rejects_blank_questions_path() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/millionaire"),
            ("QUESTIONS_PATH", "  "),
        ]);

        assert!(matches!(
            ImportConfig::from_lookup(lookup),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_from_lookup_rejects_invalid_pool_size() {
        for raw in ["many", "0", "-1"] {
            let pairs = [
                ("DATABASE_URL", "postgres://localhost/millionaire"),
                ("QUESTIONS_PATH", "pack.yaml"),
                ("DB_MAX_CONNECTIONS", raw),
            ];
            let lookup = lookup_from(&pairs);

            assert!(
                matches!(ImportConfig::from_lookup(lookup), Err(AppError::Config(_))),
                "{raw} should be rejected"
            );
        }
    }
}
