//! Environment-driven configuration for hosts embedding the engine.
//!
//! # Responsibility
//! - Read the content root, language and log level from the environment.
//! - Open the filesystem content store the configuration points at.
//!
//! # Invariants
//! - `TYPIKON_CONTENT_ROOT` is required; every other variable has a default.
//! - A loaded configuration always carries a valid language tag and level.

use crate::logging::{default_log_level, normalize_level};
use crate::store::{is_language_tag, FsContentStore, StoreResult};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CONTENT_ROOT_VAR: &str = "TYPIKON_CONTENT_ROOT";
pub const LANG_VAR: &str = "TYPIKON_LANG";
pub const LOG_LEVEL_VAR: &str = "TYPIKON_LOG_LEVEL";

const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVariable { name: &'static str, hint: &'static str },
    InvalidLanguage(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVariable { name, hint } => {
                write!(f, "environment variable {name} is not set; {hint}")
            }
            Self::InvalidLanguage(lang) => write!(
                f,
                "invalid {LANG_VAR} `{lang}`; expected segments like `en` or `cu/ru`"
            ),
            Self::InvalidLogLevel(message) => write!(f, "invalid {LOG_LEVEL_VAR}: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypikonConfig {
    pub content_root: PathBuf,
    pub language: String,
    pub log_level: &'static str,
}

impl TypikonConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let content_root = value(CONTENT_ROOT_VAR).ok_or(ConfigError::MissingVariable {
            name: CONTENT_ROOT_VAR,
            hint: "set it to the directory holding xml/Commands/Fasting.xml",
        })?;

        let language = value(LANG_VAR).unwrap_or_else(|| DEFAULT_LANG.to_string());
        let language = language.trim().trim_matches('/').to_string();
        if !is_language_tag(&language) {
            return Err(ConfigError::InvalidLanguage(language));
        }

        let log_level = match value(LOG_LEVEL_VAR) {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            content_root: PathBuf::from(content_root.trim()),
            language,
            log_level,
        })
    }

    pub fn open_store(&self) -> StoreResult<FsContentStore> {
        FsContentStore::open(&self.content_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn missing_content_root_names_the_variable() {
        let err = TypikonConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVariable {
                name: CONTENT_ROOT_VAR,
                ..
            }
        ));
        assert!(err.to_string().contains(CONTENT_ROOT_VAR));
    }

    #[test]
    fn defaults_apply_for_optional_variables() {
        let config = TypikonConfig::from_lookup(lookup(&[(CONTENT_ROOT_VAR, "/srv/typikon")]))
            .unwrap();
        assert_eq!(config.content_root, PathBuf::from("/srv/typikon"));
        assert_eq!(config.language, "en");
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn language_and_level_are_validated() {
        let config = TypikonConfig::from_lookup(lookup(&[
            (CONTENT_ROOT_VAR, "/srv/typikon"),
            (LANG_VAR, "cu/ru"),
            (LOG_LEVEL_VAR, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(config.language, "cu/ru");
        assert_eq!(config.log_level, "warn");

        let err = TypikonConfig::from_lookup(lookup(&[
            (CONTENT_ROOT_VAR, "/srv/typikon"),
            (LANG_VAR, "en us"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidLanguage("en us".to_string()));
    }

    #[test]
    fn open_store_rejects_root_without_marker() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = TypikonConfig::from_lookup(lookup(&[(CONTENT_ROOT_VAR, root)])).unwrap();
        assert!(matches!(
            config.open_store(),
            Err(StoreError::InvalidRoot { .. })
        ));
    }
}
