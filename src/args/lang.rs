//! `show`, `set-lang` and `toggle` commands.

use std::process::ExitCode;

use super::{Session, parse_lang};

/// What: Print the active language, its name and direction, and the document tag.
///
/// Inputs:
/// - `session`: Started session
/// - `json`: Emit a JSON object instead of text
pub fn handle_show(session: &Session, json: bool) -> ExitCode {
    let translator = &session.translator;
    let locale = translator.current_locale();
    let name = translator.catalog().display_name(locale);
    let direction = translator.direction();
    let tag = session.document_tag();
    if json {
        let value = serde_json::json!({
            "locale": locale.code(),
            "name": name,
            "direction": direction.as_attr(),
            "fallback": translator.fallback_locale().code(),
            "storage_key": session.config.storage_key,
            "document": tag,
        });
        println!("{value}");
    } else {
        println!("{locale} ({name}), {direction}");
        println!("{tag}");
    }
    ExitCode::SUCCESS
}

/// What: Switch to `code` and save it.
///
/// Output:
/// - `ExitCode::FAILURE` for an unsupported or unloaded language
pub fn handle_set_lang(session: &mut Session, code: &str) -> ExitCode {
    let Some(locale) = parse_lang(code) else {
        return ExitCode::FAILURE;
    };
    if !session.translator.catalog().supports(locale) {
        eprintln!("No translations loaded for '{locale}'");
        tracing::error!(locale = %locale, "Requested language has no loaded translations");
        return ExitCode::FAILURE;
    }
    if session.translator.set_locale(locale) {
        println!("Language set to {locale}");
    } else {
        println!("Language unchanged ({locale})");
    }
    println!("{}", session.document_tag());
    ExitCode::SUCCESS
}

/// What: Switch to the next loaded language and save it.
pub fn handle_toggle(session: &mut Session) -> ExitCode {
    let locale = session.translator.cycle_locale();
    println!("Language set to {locale}");
    println!("{}", session.document_tag());
    ExitCode::SUCCESS
}
