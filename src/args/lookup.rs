//! `lookup` command.

use std::process::ExitCode;

use msmaaedeh::i18n::translate_with_fallback;

use super::{Session, parse_lang};

/// What: Print the translation of each key, one per line.
///
/// Inputs:
/// - `session`: Started session
/// - `keys`: Dotted keys
/// - `lang`: Optional one-off language; the saved preference is left alone
///
/// Output:
/// - `ExitCode::FAILURE` only for an unsupported `lang`; missing keys print as themselves
pub fn handle_lookup(session: &Session, keys: &[String], lang: Option<&str>) -> ExitCode {
    let translator = &session.translator;
    let locale = match lang {
        Some(code) => match parse_lang(code) {
            Some(locale) => locale,
            None => return ExitCode::FAILURE,
        },
        None => translator.current_locale(),
    };
    tracing::debug!(locale = %locale, count = keys.len(), "Lookup requested from CLI");
    for key in keys {
        println!(
            "{}",
            translate_with_fallback(
                translator.catalog(),
                locale,
                translator.fallback_locale(),
                key
            )
        );
    }
    ExitCode::SUCCESS
}
