//! Locale metadata and defaults loaded from `config/i18n.yml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{I18nError, Locale, LocaleMeta};

/// The `config/i18n.yml` shipped with the crate.
const BUNDLED_CONFIG: &str = include_str!("../../config/i18n.yml");

/// Namespaced key of the persisted language preference.
pub const DEFAULT_STORAGE_KEY: &str = "msmaaedeh.lang";

/// i18n configuration: defaults plus the locale metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct I18nConfig {
    /// Locale used when no valid preference is stored.
    pub default_locale: Locale,
    /// Locale consulted when a key is missing from the active locale.
    pub fallback_locale: Locale,
    /// Key of the durable preference slot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Name and direction of every supported locale.
    #[serde(default)]
    pub locales: BTreeMap<Locale, LocaleMeta>,
}

/// Serde default for [`I18nConfig::storage_key`].
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl I18nConfig {
    /// What: Parse the configuration bundled into the binary.
    ///
    /// # Errors
    /// - Returns `Err` only if the bundled YAML is malformed, which the unit tests guard against
    pub fn bundled() -> Result<Self, I18nError> {
        Self::parse(BUNDLED_CONFIG)
    }

    /// What: Parse configuration from YAML text.
    ///
    /// # Errors
    /// - Returns `Err` when the YAML is invalid or names an unsupported locale
    pub fn parse(yaml: &str) -> Result<Self, I18nError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// What: Load configuration from a file.
    ///
    /// # Errors
    /// - Returns `Err` when the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, I18nError> {
        let contents = fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// What: Load an override file if given, otherwise the bundled config.
    ///
    /// Inputs:
    /// - `path`: Optional override file
    ///
    /// Output:
    /// - A usable configuration; never fails
    ///
    /// Details:
    /// - A broken override is logged and replaced by the bundled config
    /// - A broken bundled config degrades to English-only LTR defaults
    #[must_use]
    pub fn load_or_default(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "[I18n] Loaded i18n config override");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "[I18n] Failed to load i18n config override; using bundled config"
                    );
                }
            }
        }
        Self::bundled().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "[I18n] Bundled i18n config is invalid; using built-in defaults");
            Self::default()
        })
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            fallback_locale: Locale::En,
            storage_key: default_storage_key(),
            locales: BTreeMap::new(),
        }
    }
}
