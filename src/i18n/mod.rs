//! Internationalization (i18n) for the Ms. Maaedeh website.
//!
//! This module owns the translation catalog, the active locale, the persisted
//! language preference and the document `lang`/`dir` side effect.
//!
//! # Overview
//!
//! - **Catalog**: One translation tree per locale, parsed from `locales/{code}.yml`
//!   and read-only afterwards
//! - **Lookup**: Dotted keys (`home.hero.tagline`) are resolved in the active locale,
//!   then in the fallback locale, then returned verbatim so gaps show up on the page
//! - **Preference**: The chosen locale is stored under one namespaced key
//!   (`msmaaedeh.lang`); storage failures are logged and ignored
//! - **Direction**: Every locale change sets the document's `lang` and `dir`
//!   attributes from the per-locale metadata in `config/i18n.yml`
//!
//! # Locale Files
//!
//! Each bundle has a single top-level key naming its locale:
//!
//! ```yaml
//! fa:
//!   nav:
//!     home: "خانه"
//! ```
//!
//! This becomes accessible as `nav.home`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use msmaaedeh::i18n::{self, Catalog, I18nConfig, Locale, LocalePreference, MemoryBackend};
//!
//! let config = I18nConfig::load_or_default(None);
//! let catalog = Catalog::bundled(&config);
//! let preference = LocalePreference::new(MemoryBackend::new(), config.storage_key.clone());
//! let mut translator = i18n::bootstrap(&config, catalog, preference, None);
//!
//! let home = translator.translate("nav.home");
//! translator.set_locale(Locale::Fa);
//! ```
//!
//! # Adding a New Locale
//!
//! 1. Add a variant to [`Locale`]
//! 2. Create `locales/{code}.yml` with the same key structure as `locales/en.yml`
//! 3. Add the locale's `name` and `direction` to `config/i18n.yml`
//! 4. Run `msmaaedeh check` to confirm the key sets match
//!
//! # Error Handling
//!
//! - Missing keys fall back to the fallback locale, then to the key itself
//! - Unsupported or unreadable stored preferences fall back to the default locale
//! - A missing document surface turns the direction effect into a no-op
//! - Only catalog and config loading return errors; lookups and switches never do

mod catalog;
mod config;
mod direction;
mod error;
mod loader;
mod locale;
mod preference;
mod translator;

pub use catalog::{Catalog, Node, ParityReport};
pub use config::{DEFAULT_STORAGE_KEY, I18nConfig};
pub use direction::{DirectionEffect, DocumentRoot, DocumentSurface};
pub use error::{I18nError, StorageError};
pub use loader::{load_locale_file, parse_locale_yaml};
pub use locale::{Direction, Locale, LocaleMeta};
pub use preference::{
    FileBackend, LocalePreference, MemoryBackend, PreferenceBackend, UnavailableBackend,
};
pub use translator::{
    ChangeCause, I18nContext, LocaleChange, LocaleObserver, PersistLocale, Translator, bootstrap,
    translate_with_fallback,
};

use std::path::PathBuf;

/// Installed data location used when not running from source.
const INSTALLED_DATA_DIR: &str = "/usr/share/msmaaedeh";

/// What: Find a config file in development and installed locations.
///
/// Inputs:
/// - `relative_path`: Relative path from config directory (e.g., "i18n.yml")
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None` if not found
///
/// Details:
/// - Tries `CARGO_MANIFEST_DIR/config/{relative_path}` first, then
///   `/usr/share/msmaaedeh/config/{relative_path}`
pub fn find_config_file(relative_path: &str) -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join(relative_path);
    if dev_path.is_file() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from(INSTALLED_DATA_DIR)
        .join("config")
        .join(relative_path);
    installed_path.is_file().then_some(installed_path)
}

/// What: Find the locales directory in development and installed locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing locales directory, or `None`
///
/// Details:
/// - Tries `CARGO_MANIFEST_DIR/locales` first, then `/usr/share/msmaaedeh/locales`
pub fn find_locales_dir() -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("locales");
    if dev_path.is_dir() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from(INSTALLED_DATA_DIR).join("locales");
    installed_path.is_dir().then_some(installed_path)
}

/// What: Translate a key and fill `{}` placeholders in order.
///
/// Inputs:
/// - `ctx`: Anything implementing the presentation contract
/// - `key`: Dot-notation key
/// - `args`: Values for the placeholders
///
/// Output:
/// - Formatted translated string
///
/// Details:
/// - First `{}` gets the first arg, and so on; extra args are ignored
/// - Leftover placeholders stay visible
pub fn translate_fmt(
    ctx: &(impl I18nContext + ?Sized),
    key: &str,
    args: &[&dyn std::fmt::Display],
) -> String {
    let mut result = ctx.translate(key);
    for arg in args {
        result = result.replacen("{}", &arg.to_string(), 1);
    }
    result
}
