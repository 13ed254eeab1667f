//! Supported locales and reading direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::I18nError;

/// A locale the site ships translations for.
///
/// The set is closed at build time. Adding a language means adding a variant
/// here, a `locales/{code}.yml` bundle and an entry in `config/i18n.yml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    En,
    /// Persian (Farsi).
    Fa,
}

impl Locale {
    /// Every supported locale, in toggle order.
    pub const ALL: [Self; 2] = [Self::En, Self::Fa];

    /// What: Short language code used for storage, bundle file names and the `lang` attribute.
    ///
    /// Output:
    /// - Static code string (e.g., `"en"`, `"fa"`)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fa => "fa",
        }
    }

    /// What: Map an external code onto a supported locale.
    ///
    /// Inputs:
    /// - `code`: Raw code, e.g. read from storage or the command line
    ///
    /// Output:
    /// - `Some(Locale)` on an exact match, `None` otherwise
    ///
    /// Details:
    /// - Surrounding whitespace is ignored; case and region suffixes are not
    ///   (`"EN"` and `"en-US"` are unsupported)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::UnsupportedLocale(s.trim().to_string()))
    }
}

/// Reading direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Value for the document's `dir` attribute.
    #[must_use]
    pub const fn as_attr(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// Per-locale metadata from `config/i18n.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMeta {
    /// Native display name shown in the language switcher.
    pub name: String,
    /// Reading direction.
    #[serde(default)]
    pub direction: Direction,
}
