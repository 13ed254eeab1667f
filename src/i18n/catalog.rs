//! Translation trees and dotted-key resolution.

use std::collections::BTreeMap;

use super::{Direction, Locale, LocaleMeta};

/// One node of a locale's translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal translated string.
    Leaf(String),
    /// Named children, one per key segment.
    Branch(BTreeMap<String, Self>),
}

impl Node {
    /// What: Walk `key` one dot-separated segment at a time.
    ///
    /// Output:
    /// - `Some(&str)` when every segment resolves and the final node is a leaf
    /// - `None` on a missing segment, a leaf reached early, or a branch at the end
    #[must_use]
    pub fn descend(&self, key: &str) -> Option<&str> {
        let mut node = self;
        for segment in key.split('.') {
            match node {
                Self::Branch(children) => node = children.get(segment)?,
                Self::Leaf(_) => return None,
            }
        }
        match node {
            Self::Leaf(text) => Some(text.as_str()),
            Self::Branch(_) => None,
        }
    }

    /// What: Collect every leaf as `(dotted key, text)` under `prefix`.
    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        match self {
            Self::Leaf(text) => out.push((prefix.to_string(), text.as_str())),
            Self::Branch(children) => {
                for (name, child) in children {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    child.collect_leaves(&path, out);
                }
            }
        }
    }
}

/// Key-set comparison of one locale against the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityReport {
    /// Locale being audited.
    pub locale: Locale,
    /// Keys present in the reference locale but missing here.
    pub missing: Vec<String>,
    /// Keys present here but absent from the reference locale.
    pub extra: Vec<String>,
}

impl ParityReport {
    /// `true` when both key sets match.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Every locale's translation tree plus the locale metadata table.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Root branch per loaded locale.
    trees: BTreeMap<Locale, Node>,
    /// Display name and direction per locale.
    meta: BTreeMap<Locale, LocaleMeta>,
}

impl Catalog {
    /// What: Assemble a catalog from already parsed trees.
    ///
    /// Inputs:
    /// - `trees`: Root node per locale
    /// - `meta`: Metadata table (usually [`I18nConfig::locales`](super::I18nConfig))
    #[must_use]
    pub const fn new(trees: BTreeMap<Locale, Node>, meta: BTreeMap<Locale, LocaleMeta>) -> Self {
        Self { trees, meta }
    }

    /// Whether translations for `locale` were loaded.
    #[must_use]
    pub fn supports(&self, locale: Locale) -> bool {
        self.trees.contains_key(&locale)
    }

    /// Loaded locales in toggle order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.trees.keys().copied()
    }

    /// What: Resolve a dotted key in one locale's tree, without fallback.
    #[must_use]
    pub fn resolve(&self, locale: Locale, key: &str) -> Option<&str> {
        self.trees.get(&locale)?.descend(key)
    }

    /// Metadata entry for `locale`, if configured.
    #[must_use]
    pub fn meta(&self, locale: Locale) -> Option<&LocaleMeta> {
        self.meta.get(&locale)
    }

    /// What: Reading direction for `locale`.
    ///
    /// Details:
    /// - Locales without a metadata entry read left to right
    #[must_use]
    pub fn direction(&self, locale: Locale) -> Direction {
        self.meta.get(&locale).map_or_else(
            || {
                tracing::debug!(locale = %locale, "[I18n] No metadata for locale; assuming ltr");
                Direction::Ltr
            },
            |meta| meta.direction,
        )
    }

    /// Native display name for `locale`, or its code when unconfigured.
    #[must_use]
    pub fn display_name(&self, locale: Locale) -> &str {
        self.meta
            .get(&locale)
            .map_or_else(|| locale.code(), |meta| meta.name.as_str())
    }

    /// What: Flatten one locale into `dotted key -> text`.
    ///
    /// Output:
    /// - Sorted map; empty when the locale is not loaded
    #[must_use]
    pub fn flatten(&self, locale: Locale) -> BTreeMap<String, String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.trees.get(&locale) {
            root.collect_leaves("", &mut leaves);
        }
        leaves
            .into_iter()
            .map(|(key, text)| (key, text.to_string()))
            .collect()
    }

    /// Sorted dotted keys of every leaf in `locale`.
    #[must_use]
    pub fn keys(&self, locale: Locale) -> Vec<String> {
        self.flatten(locale).into_keys().collect()
    }

    /// What: Keys present in `reference` but missing from `locale`.
    ///
    /// Details:
    /// - A key that exists in `locale` as a branch instead of a leaf counts as missing
    #[must_use]
    pub fn missing_keys(&self, locale: Locale, reference: Locale) -> Vec<String> {
        self.keys(reference)
            .into_iter()
            .filter(|key| self.resolve(locale, key).is_none())
            .collect()
    }

    /// What: Compare every loaded locale against `reference`.
    ///
    /// Output:
    /// - One report per loaded locale other than `reference`
    #[must_use]
    pub fn parity_report(&self, reference: Locale) -> Vec<ParityReport> {
        self.locales()
            .filter(|&locale| locale != reference)
            .map(|locale| ParityReport {
                locale,
                missing: self.missing_keys(locale, reference),
                extra: self.missing_keys(reference, locale),
            })
            .collect()
    }
}
