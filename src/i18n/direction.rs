//! Document language and direction side effect.

use std::sync::{Arc, Mutex, PoisonError};

use super::{ChangeCause, Direction, LocaleChange, LocaleObserver};

/// The root element of a rendered page.
pub trait DocumentSurface: Send {
    /// Set the `lang` attribute.
    fn set_lang(&mut self, code: &str);
    /// Set the `dir` attribute.
    fn set_dir(&mut self, direction: Direction);
}

/// In-memory `<html>` element attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    /// Current `lang` attribute, unset until the first effect.
    pub lang: Option<String>,
    /// Current `dir` attribute, unset until the first effect.
    pub dir: Option<Direction>,
}

impl DocumentRoot {
    /// What: Render the opening `<html>` tag for a static page.
    ///
    /// Output:
    /// - e.g. `<html lang="fa" dir="rtl">`; unset attributes are omitted
    #[must_use]
    pub fn render_open_tag(&self) -> String {
        let mut tag = String::from("<html");
        if let Some(lang) = &self.lang {
            tag.push_str(&format!(" lang=\"{lang}\""));
        }
        if let Some(dir) = self.dir {
            tag.push_str(&format!(" dir=\"{}\"", dir.as_attr()));
        }
        tag.push('>');
        tag
    }
}

impl DocumentSurface for DocumentRoot {
    fn set_lang(&mut self, code: &str) {
        self.lang = Some(code.to_string());
    }

    fn set_dir(&mut self, direction: Direction) {
        self.dir = Some(direction);
    }
}

impl<S: DocumentSurface> DocumentSurface for Arc<Mutex<S>> {
    fn set_lang(&mut self, code: &str) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_lang(code);
    }

    fn set_dir(&mut self, direction: Direction) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_dir(direction);
    }
}

/// Keeps the document's `lang` and `dir` in step with the active locale.
///
/// Without a surface (headless rendering, command-line use) it does nothing.
pub struct DirectionEffect {
    /// Target surface, if one exists.
    surface: Option<Box<dyn DocumentSurface>>,
}

impl std::fmt::Debug for DirectionEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionEffect")
            .field("has_surface", &self.surface.is_some())
            .finish()
    }
}

impl DirectionEffect {
    /// Effect writing to `surface`.
    #[must_use]
    pub fn new(surface: impl DocumentSurface + 'static) -> Self {
        Self {
            surface: Some(Box::new(surface)),
        }
    }

    /// Effect writing to an already boxed surface.
    #[must_use]
    pub fn from_boxed(surface: Box<dyn DocumentSurface>) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Effect with no surface.
    #[must_use]
    pub fn headless() -> Self {
        Self { surface: None }
    }
}

impl LocaleObserver for DirectionEffect {
    fn locale_changed(&mut self, change: &LocaleChange) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::trace!(locale = %change.locale, "[I18n] No document surface; skipping direction update");
            return;
        };
        surface.set_lang(change.locale.code());
        surface.set_dir(change.direction);
        tracing::debug!(
            locale = %change.locale,
            dir = %change.direction,
            initial = matches!(change.cause, ChangeCause::Initial),
            "[I18n] Applied document language and direction"
        );
    }
}
