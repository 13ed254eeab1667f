//! `check` and `export` commands.

use std::process::ExitCode;

use msmaaedeh::i18n::Locale;

use super::{Session, parse_lang};

/// What: Report key differences between every language and the fallback.
///
/// Output:
/// - `ExitCode::FAILURE` if any language is unloaded or its keys differ
pub fn handle_check(session: &Session) -> ExitCode {
    let catalog = session.translator.catalog();
    let reference = session.translator.fallback_locale();
    let mut ok = true;

    for locale in Locale::ALL {
        if !catalog.supports(locale) {
            println!("{locale}: no translations loaded");
            ok = false;
        }
    }
    for report in catalog.parity_report(reference) {
        if report.is_clean() {
            println!("{}: ok", report.locale);
            continue;
        }
        ok = false;
        for key in &report.missing {
            println!("{}: missing {key}", report.locale);
        }
        for key in &report.extra {
            println!("{}: not in {reference}: {key}", report.locale);
        }
    }

    if ok {
        tracing::info!("Translation key sets match");
        ExitCode::SUCCESS
    } else {
        tracing::warn!("Translation key sets differ");
        ExitCode::FAILURE
    }
}

/// What: Print one language's translations as a flat `{key: text}` JSON object.
///
/// Inputs:
/// - `lang`: Language to export; the active one when `None`
pub fn handle_export(session: &Session, lang: Option<&str>) -> ExitCode {
    let locale = match lang {
        Some(code) => match parse_lang(code) {
            Some(locale) => locale,
            None => return ExitCode::FAILURE,
        },
        None => session.translator.current_locale(),
    };
    let flat = session.translator.catalog().flatten(locale);
    match serde_json::to_string_pretty(&flat) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize translations: {e}");
            tracing::error!(error = %e, "Failed to serialize translations");
            ExitCode::FAILURE
        }
    }
}
