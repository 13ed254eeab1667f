//! Error types for catalog loading and preference storage.
//!
//! Runtime lookups and locale switches never fail; these errors only surface
//! while building a [`Catalog`](super::Catalog) or talking to a storage backend.

use std::path::PathBuf;

/// Errors raised while loading configuration or locale bundles.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// YAML content could not be parsed.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A locale code outside the supported set.
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    /// A value in a locale tree that is neither a mapping nor a string-like scalar.
    #[error("invalid translation node at '{path}': {reason}")]
    InvalidNode {
        /// Dotted path of the offending node.
        path: String,
        /// What was found instead.
        reason: &'static str,
    },

    /// A locale bundle with no translations.
    #[error("locale bundle is empty")]
    EmptyBundle,

    /// A bundle whose top-level code differs from the locale it was loaded for.
    #[error("expected bundle for '{expected}', found '{found}'")]
    LocaleMismatch {
        /// Locale the caller asked for.
        expected: String,
        /// Locale the bundle declares.
        found: String,
    },
}

/// Errors raised by a [`PreferenceBackend`](super::PreferenceBackend).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store does not exist in this environment or has been disabled.
    #[error("preference storage is unavailable")]
    Unavailable,

    /// The backing store rejected a read or write.
    #[error("preference storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
