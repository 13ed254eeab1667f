//! Locale bundle loading and parsing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_norway::Value;

use super::{Catalog, I18nConfig, I18nError, Locale, Node};

/// Bundles compiled into the binary, one per [`Locale`].
const BUNDLED_LOCALES: [(Locale, &str); 2] = [
    (Locale::En, include_str!("../../locales/en.yml")),
    (Locale::Fa, include_str!("../../locales/fa.yml")),
];

/// What: Parse one locale bundle.
///
/// Inputs:
/// - `yaml_content`: Bundle text with a single top-level key naming the locale
///
/// Output:
/// - `Result<(Locale, Node), I18nError>` with the declared locale and its root branch
///
/// # Errors
/// - Returns `Err` when the content is empty or not valid YAML
/// - Returns `Err` when the top-level key is not exactly one supported locale code
/// - Returns `Err` when a value is a sequence, null or tagged value
pub fn parse_locale_yaml(yaml_content: &str) -> Result<(Locale, Node), I18nError> {
    if yaml_content.trim().is_empty() {
        return Err(I18nError::EmptyBundle);
    }
    let doc: Value = serde_norway::from_str(yaml_content)?;
    let Value::Mapping(top) = doc else {
        return Err(I18nError::InvalidNode {
            path: String::new(),
            reason: "expected a mapping keyed by locale code",
        });
    };
    let mut entries = top.into_iter();
    let (Some((code, body)), None) = (entries.next(), entries.next()) else {
        return Err(I18nError::InvalidNode {
            path: String::new(),
            reason: "expected exactly one top-level locale key",
        });
    };
    let code = code.as_str().ok_or(I18nError::InvalidNode {
        path: String::new(),
        reason: "locale key is not a string",
    })?;
    let locale: Locale = code.parse()?;
    let root = build_node(body, code)?;
    match root {
        Node::Branch(children) if children.is_empty() => Err(I18nError::EmptyBundle),
        Node::Branch(children) => Ok((locale, Node::Branch(children))),
        Node::Leaf(_) => Err(I18nError::InvalidNode {
            path: code.to_string(),
            reason: "locale body must be a mapping",
        }),
    }
}

/// What: Convert a YAML value into a translation node.
///
/// Inputs:
/// - `value`: YAML value
/// - `path`: Dotted path of `value`, used in error messages
///
/// Details:
/// - Numbers and booleans become leaves holding their text form
fn build_node(value: Value, path: &str) -> Result<Node, I18nError> {
    let invalid = |reason| I18nError::InvalidNode {
        path: path.to_string(),
        reason,
    };
    match value {
        Value::String(s) => Ok(Node::Leaf(s)),
        Value::Bool(b) => Ok(Node::Leaf(b.to_string())),
        Value::Number(n) => Ok(Node::Leaf(n.to_string())),
        Value::Mapping(map) => {
            let mut children = BTreeMap::new();
            for (key, child) in map {
                let Value::String(name) = key else {
                    return Err(invalid("mapping key is not a string"));
                };
                let child_path = format!("{path}.{name}");
                children.insert(name, build_node(child, &child_path)?);
            }
            Ok(Node::Branch(children))
        }
        Value::Null => Err(invalid("null value")),
        Value::Sequence(_) => Err(invalid("sequences are not supported")),
        Value::Tagged(_) => Err(invalid("tagged values are not supported")),
    }
}

/// What: Load `{locales_dir}/{code}.yml` for one locale.
///
/// # Errors
/// - Returns `Err` when the file cannot be read or parsed
/// - Returns `Err` when the file declares a different locale than its name
pub fn load_locale_file(locale: Locale, locales_dir: &Path) -> Result<Node, I18nError> {
    let file_path = locales_dir.join(format!("{}.yml", locale.code()));
    let contents = fs::read_to_string(&file_path).map_err(|source| I18nError::Io {
        path: file_path.clone(),
        source,
    })?;
    let (declared, root) = parse_locale_yaml(&contents)?;
    if declared != locale {
        return Err(I18nError::LocaleMismatch {
            expected: locale.code().to_string(),
            found: declared.code().to_string(),
        });
    }
    Ok(root)
}

impl Catalog {
    /// What: Build the catalog from the bundles compiled into the binary.
    ///
    /// Inputs:
    /// - `config`: Supplies the locale metadata table
    ///
    /// Details:
    /// - A bundle that fails to parse is skipped with a warning; its locale becomes unsupported
    #[must_use]
    pub fn bundled(config: &I18nConfig) -> Self {
        let mut trees = BTreeMap::new();
        for (locale, contents) in BUNDLED_LOCALES {
            match parse_locale_yaml(contents) {
                Ok((declared, root)) if declared == locale => {
                    trees.insert(locale, root);
                }
                Ok((declared, _)) => {
                    tracing::warn!(
                        expected = %locale,
                        found = %declared,
                        "[I18n] Bundled locale declares the wrong code; skipping"
                    );
                }
                Err(e) => {
                    tracing::warn!(locale = %locale, error = %e, "[I18n] Bundled locale is invalid; skipping");
                }
            }
        }
        tracing::debug!(locales = trees.len(), "[I18n] Loaded bundled catalog");
        Self::new(trees, config.locales.clone())
    }

    /// What: Build the catalog from `{locales_dir}/{code}.yml` files.
    ///
    /// Inputs:
    /// - `locales_dir`: Directory holding one bundle per locale
    /// - `config`: Supplies the locale metadata table
    ///
    /// Details:
    /// - Locales whose file is missing or invalid are skipped with a warning
    #[must_use]
    pub fn from_dir(locales_dir: &Path, config: &I18nConfig) -> Self {
        let mut trees = BTreeMap::new();
        for locale in Locale::ALL {
            match load_locale_file(locale, locales_dir) {
                Ok(root) => {
                    tracing::debug!(
                        locale = %locale,
                        path = %locales_dir.display(),
                        "[I18n] Loaded locale bundle"
                    );
                    trees.insert(locale, root);
                }
                Err(e) => {
                    tracing::warn!(locale = %locale, error = %e, "[I18n] Failed to load locale; skipping");
                }
            }
        }
        Self::new(trees, config.locales.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_locale_yaml() {
        let yaml = r#"
fa:
  nav:
    home: "خانه"
    gallery: "گالری"
"#;
        let (locale, root) = parse_locale_yaml(yaml).expect("Failed to parse test locale YAML");
        assert_eq!(locale, Locale::Fa);
        assert_eq!(root.descend("nav.home"), Some("خانه"));
        assert_eq!(root.descend("nav.gallery"), Some("گالری"));
    }

    #[test]
    fn test_parse_locale_yaml_nested_and_scalars() {
        let yaml = r#"
en:
  catering:
    packages:
      intimate:
        guests: 12
        popular: true
        features:
          f1: "Chef on site"
"#;
        let (_, root) = parse_locale_yaml(yaml).expect("Failed to parse test locale YAML");
        assert_eq!(
            root.descend("catering.packages.intimate.features.f1"),
            Some("Chef on site")
        );
        assert_eq!(root.descend("catering.packages.intimate.guests"), Some("12"));
        assert_eq!(root.descend("catering.packages.intimate.popular"), Some("true"));
    }

    #[test]
    fn test_parse_locale_yaml_invalid_syntax() {
        let yaml = "invalid: yaml: content: [";
        assert!(matches!(parse_locale_yaml(yaml), Err(I18nError::Yaml(_))));
    }

    #[test]
    fn test_parse_locale_yaml_empty() {
        assert!(matches!(parse_locale_yaml("  \n"), Err(I18nError::EmptyBundle)));
        assert!(matches!(parse_locale_yaml("en: {}"), Err(I18nError::EmptyBundle)));
    }

    #[test]
    fn test_parse_locale_yaml_rejects_unsupported_locale() {
        let yaml = "de:\n  nav:\n    home: Startseite\n";
        assert!(matches!(
            parse_locale_yaml(yaml),
            Err(I18nError::UnsupportedLocale(code)) if code == "de"
        ));
    }

    #[test]
    fn test_parse_locale_yaml_rejects_multiple_locales() {
        let yaml = "en:\n  a: A\nfa:\n  a: B\n";
        assert!(matches!(
            parse_locale_yaml(yaml),
            Err(I18nError::InvalidNode { .. })
        ));
    }

    #[test]
    fn test_parse_locale_yaml_reports_path_of_bad_node() {
        let yaml = "en:\n  gallery:\n    items:\n      - one\n      - two\n";
        match parse_locale_yaml(yaml) {
            Err(I18nError::InvalidNode { path, .. }) => assert_eq!(path, "en.gallery.items"),
            other => panic!("expected InvalidNode, got {other:?}"),
        }

        let yaml = "en:\n  nav:\n    home:\n";
        match parse_locale_yaml(yaml) {
            Err(I18nError::InvalidNode { path, reason }) => {
                assert_eq!(path, "en.nav.home");
                assert_eq!(reason, "null value");
            }
            other => panic!("expected InvalidNode, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_locales_parse_and_share_key_sets() {
        let config = I18nConfig::bundled().expect("bundled i18n.yml must parse");
        let catalog = Catalog::bundled(&config);
        for locale in Locale::ALL {
            assert!(catalog.supports(locale), "bundled catalog lacks '{locale}'");
        }
        for report in catalog.parity_report(config.fallback_locale) {
            assert!(report.is_clean(), "bundled locales drifted: {report:?}");
        }
        assert_eq!(catalog.resolve(Locale::En, "nav.home"), Some("Home"));
        assert_eq!(catalog.resolve(Locale::Fa, "nav.home"), Some("خانه"));
    }

    #[test]
    fn test_load_locale_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        fs::write(temp_dir.path().join("en.yml"), "en:\n  nav:\n    home: Start\n")
            .expect("Failed to write test locale file");

        let root =
            load_locale_file(Locale::En, temp_dir.path()).expect("Failed to load test locale file");
        assert_eq!(root.descend("nav.home"), Some("Start"));
    }

    #[test]
    fn test_load_locale_file_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        assert!(matches!(
            load_locale_file(Locale::Fa, temp_dir.path()),
            Err(I18nError::Io { .. })
        ));
    }

    #[test]
    fn test_load_locale_file_mismatched_code() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        fs::write(temp_dir.path().join("fa.yml"), "en:\n  nav:\n    home: Home\n")
            .expect("Failed to write test locale file");
        assert!(matches!(
            load_locale_file(Locale::Fa, temp_dir.path()),
            Err(I18nError::LocaleMismatch { .. })
        ));
    }

    #[test]
    fn test_from_dir_skips_broken_locales() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        fs::write(temp_dir.path().join("en.yml"), "en:\n  nav:\n    home: Home\n")
            .expect("Failed to write test locale file");
        fs::write(temp_dir.path().join("fa.yml"), "fa: [")
            .expect("Failed to write test locale file");

        let catalog = Catalog::from_dir(temp_dir.path(), &I18nConfig::default());
        assert!(catalog.supports(Locale::En));
        assert!(!catalog.supports(Locale::Fa));
    }
}
