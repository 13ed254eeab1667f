//! Command-line argument parsing and handling.

pub mod check;
pub mod definition;
pub mod lang;
pub mod lookup;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use msmaaedeh::i18n::{
    self, Catalog, DocumentRoot, DocumentSurface, FileBackend, I18nConfig, Locale,
    LocalePreference, Translator,
};
use msmaaedeh::paths;

pub use definition::{Args, Command, determine_log_level};

/// Everything a command needs, built once from the global flags.
pub struct Session {
    /// Defaults and locale metadata.
    pub config: I18nConfig,
    /// Translator started from the saved preference.
    pub translator: Translator,
    /// Document root kept in step by the direction effect.
    pub document: Arc<Mutex<DocumentRoot>>,
}

impl Session {
    /// What: Load config and catalog, read the saved language and start the translator.
    ///
    /// Inputs:
    /// - `args`: Parsed command-line arguments
    ///
    /// Details:
    /// - `--locales-dir` replaces the built-in bundles
    /// - The preference lives in `settings.conf` under the config directory
    pub fn start(args: &Args) -> Self {
        let config = I18nConfig::load_or_default(args.i18n_config.as_deref());
        let catalog = args.locales_dir.as_deref().map_or_else(
            || Catalog::bundled(&config),
            |dir| Catalog::from_dir(dir, &config),
        );
        let config_dir = paths::config_dir(args.config_dir.as_deref());
        let preference = LocalePreference::new(
            FileBackend::new(paths::settings_file(&config_dir)),
            config.storage_key.clone(),
        );
        let document = Arc::new(Mutex::new(DocumentRoot::default()));
        let surface: Box<dyn DocumentSurface> = Box::new(Arc::clone(&document));
        let translator = i18n::bootstrap(&config, catalog, preference, Some(surface));
        Self {
            config,
            translator,
            document,
        }
    }

    /// `<html ...>` tag reflecting the last direction effect.
    pub fn document_tag(&self) -> String {
        self.document
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .render_open_tag()
    }
}

/// What: Parse a language code given on the command line.
///
/// Output:
/// - `Some(Locale)` when supported; otherwise prints an error and returns `None`
pub fn parse_lang(code: &str) -> Option<Locale> {
    match code.parse::<Locale>() {
        Ok(locale) => Some(locale),
        Err(e) => {
            let supported: Vec<&str> = Locale::ALL.iter().map(|l| l.code()).collect();
            eprintln!("{e} (supported: {})", supported.join(", "));
            tracing::error!(code = %code, "Unsupported language requested from CLI");
            None
        }
    }
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - Process exit code
pub fn run(args: &Args) -> ExitCode {
    let mut session = Session::start(args);
    match &args.command {
        Command::Lookup { keys, lang } => lookup::handle_lookup(&session, keys, lang.as_deref()),
        Command::Show { json } => lang::handle_show(&session, *json),
        Command::SetLang { code } => lang::handle_set_lang(&mut session, code),
        Command::Toggle => lang::handle_toggle(&mut session),
        Command::Check => check::handle_check(&session),
        Command::Export { lang } => check::handle_export(&session, lang.as_deref()),
    }
}
