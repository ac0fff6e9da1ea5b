//! Durable persistence for the application state.
//!
//! The whole state lives in a single JSON slot:
//!
//! ```text
//! <root>/state-v1.json
//! ```
//!
//! The gateway never surfaces errors to its caller. Loads fall back to the
//! default state on any problem; saves and clears log failures and drop
//! them. At worst one state revision is lost, never the session.

use std::{fs, io, path::PathBuf};

use tracing::warn;

use crate::model::{self, AppState};

/// File name of the one durable slot under the storage root.
const STATE_FILE: &str = "state-v1.json";

#[derive(Debug, thiserror::Error)]
enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a load fell back to the default state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No blob exists (fresh install, or after a reset).
    Missing,
    /// The blob exists but could not be read.
    Unreadable,
    /// The blob is not valid JSON.
    MalformedJson,
    /// The blob is JSON but fails schema validation.
    SchemaMismatch,
}

/// The result of a load: always a usable state, tagged with where it came
/// from. The "never errors past this boundary" contract lives in this type.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The stored blob parsed and validated; returned verbatim.
    Stored(AppState),

    /// The stored blob was unusable; this is the default state.
    Fallback {
        state: AppState,
        reason: FallbackReason,
    },
}

impl LoadOutcome {
    /// The loaded state, regardless of provenance.
    #[must_use]
    pub fn into_state(self) -> AppState {
        match self {
            Self::Stored(state) | Self::Fallback { state, .. } => state,
        }
    }
}

/// File-based storage for the state blob.
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    /// Creates a store rooted at the given directory, creating it if
    /// needed. This is the one storage operation that can fail outward:
    /// without a writable root there is nothing to gracefully degrade to.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.pureheart/`.
    #[must_use]
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pureheart"))
    }

    /// Loads the persisted state, falling back to the default on any
    /// missing, unreadable, malformed, or schema-invalid blob.
    #[must_use]
    pub fn load(&self) -> LoadOutcome {
        let raw = match fs::read_to_string(self.state_path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return fallback(FallbackReason::Missing);
            }
            Err(e) => {
                warn!("failed to read state blob: {e}");
                return fallback(FallbackReason::Unreadable);
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("state blob is not valid JSON, discarding: {e}");
                return fallback(FallbackReason::MalformedJson);
            }
        };

        match model::validate(value) {
            Ok(state) => LoadOutcome::Stored(state),
            Err(e) => {
                warn!("state blob failed schema validation, discarding: {e}");
                fallback(FallbackReason::SchemaMismatch)
            }
        }
    }

    /// Persists the full state, overwriting the slot.
    ///
    /// No pre-write validation: the in-memory state is valid by
    /// construction, since it is only ever produced by the reducer from a
    /// validated or default state. Failures are logged and dropped.
    pub fn save(&self, state: &AppState) {
        if let Err(e) = self.try_save(state) {
            warn!("failed to persist state, dropping this revision: {e}");
        }
    }

    /// Removes the durable slot. A missing slot is not an error; other
    /// failures are logged and dropped.
    pub fn clear(&self) {
        match fs::remove_file(self.state_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to clear state blob: {e}"),
        }
    }

    fn try_save(&self, state: &AppState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(self.state_path(), json)?;
        Ok(())
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }
}

fn fallback(reason: FallbackReason) -> LoadOutcome {
    LoadOutcome::Fallback {
        state: model::default_state(),
        reason,
    }
}
