//! Library entry for msmaaedeh: the website's i18n subsystem.
//!
//! Page components depend only on [`i18n::I18nContext`]; everything else here
//! is wiring for the translator behind it.

pub mod i18n;
pub mod paths;
