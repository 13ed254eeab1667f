//! Active locale, key lookup with fallback, and change notification.

use super::{
    Catalog, Direction, DirectionEffect, DocumentSurface, I18nConfig, Locale, LocalePreference,
};

/// Why observers are being notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// The locale resolved at startup.
    Initial,
    /// A later switch through [`Translator::set_locale`].
    Switched,
}

/// A locale transition as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleChange {
    /// New active locale.
    pub locale: Locale,
    /// Its reading direction.
    pub direction: Direction,
    /// Startup or switch.
    pub cause: ChangeCause,
}

/// Reacts synchronously to locale changes, in registration order.
pub trait LocaleObserver: Send {
    /// Called once at startup and once per successful switch.
    fn locale_changed(&mut self, change: &LocaleChange);
}

/// Writes every switched locale to the preference store.
///
/// The startup locale is not written back.
#[derive(Debug)]
pub struct PersistLocale {
    /// Target slot.
    preference: LocalePreference,
}

impl PersistLocale {
    /// Observer persisting into `preference`.
    #[must_use]
    pub const fn new(preference: LocalePreference) -> Self {
        Self { preference }
    }
}

impl LocaleObserver for PersistLocale {
    fn locale_changed(&mut self, change: &LocaleChange) {
        if change.cause == ChangeCause::Switched {
            self.preference.write(change.locale);
        }
    }
}

/// The presentation-layer contract: everything a page needs from i18n.
pub trait I18nContext {
    /// Display string for a dotted key; never empty, never fails.
    fn translate(&self, key: &str) -> String;
    /// Locale currently used for lookups.
    fn current_locale(&self) -> Locale;
    /// Switch locale; returns `true` when a transition happened.
    fn set_locale(&mut self, locale: Locale) -> bool;
}

/// What: Look up `key` in `locale`, then in `fallback`, then give up.
///
/// Inputs:
/// - `catalog`: Translation trees
/// - `locale`: Active locale
/// - `fallback`: Locale consulted when `locale` lacks the key
/// - `key`: Dotted key (e.g., "home.hero.tagline")
///
/// Output:
/// - The active locale's text, the fallback's text, or `key` itself
///
/// Details:
/// - Pure function of its inputs; misses are logged at debug level only
#[must_use]
pub fn translate_with_fallback(
    catalog: &Catalog,
    locale: Locale,
    fallback: Locale,
    key: &str,
) -> String {
    if let Some(text) = catalog.resolve(locale, key) {
        return text.to_string();
    }

    if locale != fallback
        && let Some(text) = catalog.resolve(fallback, key)
    {
        tracing::debug!(
            "Translation key '{}' not found in '{}', using fallback '{}'",
            key,
            locale,
            fallback
        );
        return text.to_string();
    }

    tracing::debug!(
        "Missing translation key: '{}'. Returning key as-is. Please add this key to locale files.",
        key
    );
    key.to_string()
}

/// Owns the catalog and the active locale; the single place locales change.
pub struct Translator {
    /// Read-only translation trees.
    catalog: Catalog,
    /// Locale used for lookups.
    active: Locale,
    /// Locale consulted on a miss.
    fallback: Locale,
    /// Notified in order on every change.
    observers: Vec<Box<dyn LocaleObserver>>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("active", &self.active)
            .field("fallback", &self.fallback)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// What: Create the translator and announce the starting locale.
    ///
    /// Inputs:
    /// - `catalog`: Translation trees and locale metadata
    /// - `initial`: Preferred starting locale, if any
    /// - `fallback`: Locale used when `initial` is absent or unsupported, and for missing keys
    /// - `observers`: Notified in order, here once with [`ChangeCause::Initial`]
    #[must_use]
    pub fn initialize(
        catalog: Catalog,
        initial: Option<Locale>,
        fallback: Locale,
        observers: Vec<Box<dyn LocaleObserver>>,
    ) -> Self {
        let active = match initial {
            Some(locale) if catalog.supports(locale) => locale,
            Some(locale) => {
                tracing::debug!(
                    requested = %locale,
                    fallback = %fallback,
                    "[I18n] Requested locale not loaded; using fallback"
                );
                fallback
            }
            None => fallback,
        };
        let mut translator = Self {
            catalog,
            active,
            fallback,
            observers,
        };
        tracing::info!(locale = %active, fallback = %fallback, "[I18n] Translator initialized");
        translator.notify(ChangeCause::Initial);
        translator
    }

    /// Send the current locale to every observer.
    fn notify(&mut self, cause: ChangeCause) {
        let change = LocaleChange {
            locale: self.active,
            direction: self.catalog.direction(self.active),
            cause,
        };
        for observer in &mut self.observers {
            observer.locale_changed(&change);
        }
    }

    /// What: Translate a dotted key for the active locale.
    ///
    /// Output:
    /// - Active text, fallback text, or `key` itself
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        translate_with_fallback(&self.catalog, self.active, self.fallback, key)
    }

    /// Locale currently used for lookups.
    #[must_use]
    pub const fn current_locale(&self) -> Locale {
        self.active
    }

    /// Locale consulted for missing keys.
    #[must_use]
    pub const fn fallback_locale(&self) -> Locale {
        self.fallback
    }

    /// Reading direction of the active locale.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.catalog.direction(self.active)
    }

    /// Read-only access to the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// What: Switch the active locale.
    ///
    /// Inputs:
    /// - `locale`: Requested locale
    ///
    /// Output:
    /// - `true` when the locale changed; `false` for a no-op
    ///
    /// Details:
    /// - No-op when `locale` is already active or has no translations loaded
    /// - Otherwise updates the locale, then notifies observers in order
    pub fn set_locale(&mut self, locale: Locale) -> bool {
        if locale == self.active {
            return false;
        }
        if !self.catalog.supports(locale) {
            tracing::debug!(locale = %locale, "[I18n] Ignoring switch to unloaded locale");
            return false;
        }
        tracing::info!(from = %self.active, to = %locale, "[I18n] Switching locale");
        self.active = locale;
        self.notify(ChangeCause::Switched);
        true
    }

    /// What: Switch to the next loaded locale, wrapping around.
    ///
    /// Output:
    /// - The locale active afterwards (unchanged when only one is loaded)
    pub fn cycle_locale(&mut self) -> Locale {
        let loaded: Vec<Locale> = self.catalog.locales().collect();
        let next = loaded
            .iter()
            .position(|&l| l == self.active)
            .and_then(|i| loaded.get((i + 1) % loaded.len()))
            .or_else(|| loaded.first())
            .copied();
        if let Some(next) = next {
            self.set_locale(next);
        }
        self.active
    }
}

impl I18nContext for Translator {
    fn translate(&self, key: &str) -> String {
        Self::translate(self, key)
    }

    fn current_locale(&self) -> Locale {
        Self::current_locale(self)
    }

    fn set_locale(&mut self, locale: Locale) -> bool {
        Self::set_locale(self, locale)
    }
}

/// What: Start the i18n subsystem.
///
/// Inputs:
/// - `config`: Default and fallback locales
/// - `catalog`: Translation trees
/// - `preference`: Stored language slot, read once here and written on every switch
/// - `surface`: Document root to keep in step, or `None` when headless
///
/// Output:
/// - A translator whose starting locale already reached the surface
///
/// Details:
/// - Starting locale: stored preference, else `config.default_locale`; unloaded → fallback
/// - Observers run direction first, persistence second
#[must_use]
pub fn bootstrap(
    config: &I18nConfig,
    catalog: Catalog,
    preference: LocalePreference,
    surface: Option<Box<dyn DocumentSurface>>,
) -> Translator {
    let initial = preference.read().unwrap_or(config.default_locale);
    let effect = surface.map_or_else(DirectionEffect::headless, DirectionEffect::from_boxed);
    Translator::initialize(
        catalog,
        Some(initial),
        config.fallback_locale,
        vec![Box::new(effect), Box::new(PersistLocale::new(preference))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocaleMeta, MemoryBackend, Node};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    /// Records every change it sees, tagged with a label.
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<(&'static str, LocaleChange)>>>,
    }

    impl LocaleObserver for Recorder {
        fn locale_changed(&mut self, change: &LocaleChange) {
            self.log
                .lock()
                .expect("log lock")
                .push((self.label, *change));
        }
    }

    fn tree(entries: &[(&str, &str)]) -> Node {
        let mut nav = BTreeMap::new();
        for (k, v) in entries {
            nav.insert((*k).to_string(), Node::Leaf((*v).to_string()));
        }
        let mut root = BTreeMap::new();
        root.insert("nav".to_string(), Node::Branch(nav));
        Node::Branch(root)
    }

    fn catalog() -> Catalog {
        let mut trees = BTreeMap::new();
        trees.insert(
            Locale::En,
            tree(&[("home", "Home"), ("gallery", "Gallery")]),
        );
        trees.insert(Locale::Fa, tree(&[("home", "خانه")]));
        let mut meta = BTreeMap::new();
        meta.insert(
            Locale::En,
            LocaleMeta {
                name: "English".to_string(),
                direction: Direction::Ltr,
            },
        );
        meta.insert(
            Locale::Fa,
            LocaleMeta {
                name: "فارسی".to_string(),
                direction: Direction::Rtl,
            },
        );
        Catalog::new(trees, meta)
    }

    fn english_only() -> Catalog {
        let mut trees = BTreeMap::new();
        trees.insert(Locale::En, tree(&[("home", "Home")]));
        Catalog::new(trees, BTreeMap::new())
    }

    type Log = Arc<Mutex<Vec<(&'static str, LocaleChange)>>>;

    fn recorders(labels: &[&'static str]) -> (Log, Vec<Box<dyn LocaleObserver>>) {
        let log: Log = Arc::default();
        let observers = labels
            .iter()
            .map(|&label| {
                Box::new(Recorder {
                    label,
                    log: Arc::clone(&log),
                }) as Box<dyn LocaleObserver>
            })
            .collect();
        (log, observers)
    }

    #[test]
    fn test_translate_with_fallback() {
        let catalog = catalog();
        assert_eq!(
            translate_with_fallback(&catalog, Locale::Fa, Locale::En, "nav.home"),
            "خانه"
        );
        assert_eq!(
            translate_with_fallback(&catalog, Locale::Fa, Locale::En, "nav.gallery"),
            "Gallery"
        );
        assert_eq!(
            translate_with_fallback(&catalog, Locale::Fa, Locale::En, "nav.doesNotExist"),
            "nav.doesNotExist"
        );
        // A branch is not a translation
        assert_eq!(
            translate_with_fallback(&catalog, Locale::En, Locale::En, "nav"),
            "nav"
        );
    }

    #[test]
    fn test_initialize_notifies_once_with_initial_cause() {
        let (log, observers) = recorders(&["direction"]);
        let translator = Translator::initialize(catalog(), Some(Locale::Fa), Locale::En, observers);
        assert_eq!(translator.current_locale(), Locale::Fa);
        assert_eq!(translator.direction(), Direction::Rtl);

        let log = log.lock().expect("log lock");
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0].1,
            LocaleChange {
                locale: Locale::Fa,
                direction: Direction::Rtl,
                cause: ChangeCause::Initial,
            }
        );
    }

    #[test]
    fn test_initialize_with_unloaded_locale_uses_fallback() {
        let translator = Translator::initialize(english_only(), Some(Locale::Fa), Locale::En, Vec::new());
        assert_eq!(translator.current_locale(), Locale::En);
        assert_eq!(translator.fallback_locale(), Locale::En);
    }

    #[test]
    fn test_set_locale_notifies_observers_in_order() {
        let (log, observers) = recorders(&["direction", "persist"]);
        let mut translator = Translator::initialize(catalog(), None, Locale::En, observers);
        assert!(translator.set_locale(Locale::Fa));

        let log = log.lock().expect("log lock");
        let labels: Vec<_> = log.iter().map(|(label, c)| (*label, c.cause)).collect();
        assert_eq!(
            labels,
            vec![
                ("direction", ChangeCause::Initial),
                ("persist", ChangeCause::Initial),
                ("direction", ChangeCause::Switched),
                ("persist", ChangeCause::Switched),
            ]
        );
        assert_eq!(log[3].1.direction, Direction::Rtl);
    }

    #[test]
    fn test_set_locale_noops() {
        let (log, observers) = recorders(&["direction"]);
        let mut translator = Translator::initialize(english_only(), None, Locale::En, observers);

        // Already active
        assert!(!translator.set_locale(Locale::En));
        // No translations loaded
        assert!(!translator.set_locale(Locale::Fa));

        assert_eq!(translator.current_locale(), Locale::En);
        assert_eq!(log.lock().expect("log lock").len(), 1);
    }

    #[test]
    fn test_cycle_locale_wraps() {
        let mut translator = Translator::initialize(catalog(), None, Locale::En, Vec::new());
        assert_eq!(translator.cycle_locale(), Locale::Fa);
        assert_eq!(translator.cycle_locale(), Locale::En);

        let mut single = Translator::initialize(english_only(), None, Locale::En, Vec::new());
        assert_eq!(single.cycle_locale(), Locale::En);
    }

    #[test]
    fn test_persist_locale_skips_initial() {
        let backend = MemoryBackend::new();
        let preference = LocalePreference::new(backend.clone(), "msmaaedeh.lang");
        let mut translator = Translator::initialize(
            catalog(),
            Some(Locale::Fa),
            Locale::En,
            vec![Box::new(PersistLocale::new(preference))],
        );
        assert_eq!(backend.value("msmaaedeh.lang"), None);

        translator.set_locale(Locale::En);
        assert_eq!(backend.value("msmaaedeh.lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_context_trait_object() {
        fn render_nav(ctx: &dyn I18nContext) -> String {
            format!("[{}] {}", ctx.current_locale(), ctx.translate("nav.home"))
        }

        let mut translator = Translator::initialize(catalog(), None, Locale::En, Vec::new());
        assert_eq!(render_nav(&translator), "[en] Home");
        I18nContext::set_locale(&mut translator, Locale::Fa);
        assert_eq!(render_nav(&translator), "[fa] خانه");
    }
}
