//! Durable storage of the chosen language.
//!
//! Persistence is best-effort: every failure is logged and swallowed so the
//! in-memory locale is never affected by the storage backend.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::{Locale, StorageError};

/// What: Split a settings line into key and value.
///
/// Output:
/// - `Some((key, value))`, both trimmed, for `key = value` lines
/// - `None` for blank lines, comments (`#`, `//`, `;`) and lines without `=`
fn parse_setting_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
    {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// A single-slot-per-key string store.
pub trait PreferenceBackend: Send {
    /// What: Read the value stored under `key`.
    ///
    /// # Errors
    /// - Returns `Err` when the store is unavailable or the read fails
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// What: Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// - Returns `Err` when the store is unavailable or the write fails
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `key = value` settings file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    /// Settings file location.
    path: PathBuf,
}

impl FileBackend {
    /// Backend reading and writing `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Settings file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(contents
            .lines()
            .filter_map(parse_setting_line)
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .next_back())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut lines: Vec<String> = match fs::read_to_string(&self.path) {
            Ok(c) => c.lines().map(ToString::to_string).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let mut replaced = false;
        for line in &mut lines {
            if parse_setting_line(line).is_some_and(|(k, _)| k == key) {
                *line = format!("{key} = {value}");
                replaced = true;
            }
        }
        if !replaced {
            lines.push(format!("{key} = {value}"));
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut new_content = lines.join("\n");
        new_content.push('\n');
        fs::write(&self.path, new_content)?;
        Ok(())
    }
}

/// Shared state behind a [`MemoryBackend`].
#[derive(Debug)]
struct MemoryState {
    /// Stored values.
    values: HashMap<String, String>,
    /// When `false`, every call fails with [`StorageError::Unavailable`].
    available: bool,
    /// When `false`, writes fail as if the store were full.
    writable: bool,
}

/// In-process store; clones share the same slots.
///
/// Useful for embedding hosts without a filesystem and for tests, which can
/// flip it unavailable or read-only to exercise the failure paths.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    /// Shared slots and switches.
    state: Arc<Mutex<MemoryState>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                values: HashMap::new(),
                available: true,
                writable: true,
            })),
        }
    }
}

impl MemoryBackend {
    /// Empty, available, writable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the shared state, recovering from a poisoned lock.
    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call fail (`false`) or succeed again (`true`).
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    /// Make subsequent writes fail (`false`) or succeed again (`true`).
    pub fn set_writable(&self, writable: bool) {
        self.lock().writable = writable;
    }

    /// Raw value under `key`, bypassing the availability switch.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    /// Seed a raw value, bypassing the availability switch.
    pub fn insert(&self, key: &str, value: &str) {
        self.lock().values.insert(key.to_string(), value.to_string());
    }
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let state = self.lock();
        if !state.available {
            return Err(StorageError::Unavailable);
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        if !state.available {
            return Err(StorageError::Unavailable);
        }
        if !state.writable {
            return Err(StorageError::Io(std::io::Error::new(
                ErrorKind::StorageFull,
                "preference quota exceeded",
            )));
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store for hosts with no durable storage at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl PreferenceBackend for UnavailableBackend {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// The persisted language preference: one namespaced slot in a backend.
pub struct LocalePreference {
    /// Where the slot lives.
    backend: Box<dyn PreferenceBackend>,
    /// Namespaced slot key, e.g. `msmaaedeh.lang`.
    key: String,
}

impl std::fmt::Debug for LocalePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalePreference")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl LocalePreference {
    /// What: Wrap a backend slot.
    ///
    /// Inputs:
    /// - `backend`: Storage backend
    /// - `key`: Slot key
    #[must_use]
    pub fn new(backend: impl PreferenceBackend + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
        }
    }

    /// Slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// What: Read the stored locale.
    ///
    /// Output:
    /// - `Some(Locale)` when a supported code is stored
    /// - `None` when storage is unavailable, the slot is empty, or the value is unsupported
    #[must_use]
    pub fn read(&self) -> Option<Locale> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "[Persist] No stored language preference");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "[Persist] Failed to read language preference");
                return None;
            }
        };
        let locale = Locale::from_code(&raw);
        if locale.is_none() {
            tracing::debug!(
                key = %self.key,
                value = %raw,
                "[Persist] Ignoring unsupported stored language"
            );
        }
        locale
    }

    /// What: Store `locale`; failures are logged and otherwise ignored.
    pub fn write(&mut self, locale: Locale) {
        match self.backend.set(&self.key, locale.code()) {
            Ok(()) => {
                tracing::debug!(key = %self.key, locale = %locale, "[Persist] Language preference persisted");
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    locale = %locale,
                    error = %e,
                    "[Persist] Failed to write language preference"
                );
            }
        }
    }
}
