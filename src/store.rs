//! Persisted application state.
//!
//! The whole state is one JSON document. It is read once when the store is
//! opened and rewritten in full after every mutation.

use crate::error::StoreError;
use crate::item::{Bookmark, Note};
use crate::shared::migrate::decode_state;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SCHEMA_VERSION: u64 = 1;
pub const STORAGE_KEY: &str = "mindvault_data_v2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub version: u64,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            notes: Vec::new(),
            bookmarks: Vec::new(),
            theme: Theme::Light,
        }
    }
}

/// Where the serialized state lives.
pub trait Storage {
    /// The stored blob, or `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, blob: &str) -> Result<(), StoreError>;
    /// Move an unreadable blob out of the way so the next save cannot
    /// overwrite it. Returns where it went, if anywhere.
    fn quarantine(&self) -> Result<Option<String>, StoreError>;
}

/// One JSON file inside the vault directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(format!("{STORAGE_KEY}.json")) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StoreError::Malformed(format!("not valid UTF-8: {e}")))
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        let to_store_error = |source| StoreError::Write { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).map_err(to_store_error)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(to_store_error)?;
        fs::rename(&tmp, &self.path).map_err(to_store_error)
    }

    fn quarantine(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = PathBuf::from(format!("{}.corrupt.{}", self.path.display(), unix_seconds()));
        fs::rename(&self.path, &backup)?;
        Ok(Some(backup.display().to_string()))
    }
}

/// In-process storage for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RefCell<Option<String>>,
    quarantined: RefCell<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self { blob: RefCell::new(Some(blob.into())), ..Self::default() }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    pub fn quarantined(&self) -> Vec<String> {
        self.quarantined.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.borrow().clone())
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<String>, StoreError> {
        let Some(blob) = self.blob.borrow_mut().take() else {
            return Ok(None);
        };
        let mut quarantined = self.quarantined.borrow_mut();
        quarantined.push(blob);
        Ok(Some(format!("memory slot {}", quarantined.len())))
    }
}

pub struct Store<S: Storage> {
    storage: S,
    state: AppState,
}

impl<S: Storage> Store<S> {
    /// Open the store. Never fails: an absent or unreadable blob yields the
    /// default empty state.
    pub fn load(storage: S) -> Self {
        let state = match storage.read() {
            Ok(None) => {
                log::debug!("No saved vault; starting empty");
                AppState::default()
            }
            Ok(Some(raw)) => match decode_state(&raw) {
                Ok(state) => {
                    log::debug!(
                        "Loaded {} notes and {} bookmarks",
                        state.notes.len(),
                        state.bookmarks.len()
                    );
                    state
                }
                Err(err) => set_aside(&storage, &err),
            },
            Err(StoreError::Io(err)) => {
                log::warn!("Could not read saved vault ({err}); starting empty");
                AppState::default()
            }
            Err(err) => set_aside(&storage, &err),
        };
        Self { storage, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serialize and persist the entire state.
    pub fn save(&self) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(&self.state)?;
        self.storage.write(&blob)?;
        log::debug!("Saved vault ({} bytes)", blob.len());
        Ok(())
    }

    /// Run a reducer over the state, then persist the result.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> Result<R, StoreError> {
        let result = f(&mut self.state);
        self.save()?;
        Ok(result)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme, StoreError> {
        self.mutate(|state| {
            state.theme = theme;
            theme
        })
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let next = self.state.theme.toggled();
        self.set_theme(next)
    }
}

/// Quarantine a blob that was read but cannot be used, so the next save
/// starts from an empty state without destroying it.
fn set_aside<S: Storage>(storage: &S, err: &StoreError) -> AppState {
    log::warn!("Saved vault is unreadable ({err}); starting empty");
    match storage.quarantine() {
        Ok(Some(backup)) => log::warn!("Previous data kept at {backup}"),
        Ok(None) => {}
        Err(e) => log::warn!("Could not set aside unreadable vault: {e}"),
    }
    AppState::default()
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
