// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent registry of known repositories.
//!
//! ```text
//! RepositoryRegistry
//!   Mutex<RegistryState>        (in-memory, authoritative after load)
//!        |
//!   mutate(f):  clone --> f(&mut copy) --> persist(copy) --> commit copy
//!        |
//!   persist():  NamedTempFile::new_in(dir) --> write JSON --> fsync --> rename
//!
//! gitdeck-state.json
//!   { "version": 1,
//!     "repositories": [ { "path", "isValid", "lastCheckedAt" } ],
//!     "activeRepository": "/abs/path" | null }
//! ```
//!
//! A missing or corrupt state file loads as an empty registry. A crash during
//! [`RepositoryRegistry::persist`] leaves at most a stray temp file next to
//! the state file; the previous state stays readable.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::RegistryError;

/// On-disk format version.
pub const STATE_VERSION: u32 = 1;

/// A registered working tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Absolute path.
    pub path: PathBuf,
    /// Last validator verdict.
    pub is_valid: bool,
    /// Milliseconds since the Unix epoch of the last validation, if any.
    pub last_checked_at: Option<u64>,
}

impl Repository {
    fn unchecked(path: PathBuf) -> Self {
        Self {
            path,
            is_valid: false,
            last_checked_at: None,
        }
    }

    /// Whether the validator has ever looked at this path.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.last_checked_at.is_some()
    }
}

/// Known repositories in insertion order plus the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryState {
    pub repositories: Vec<Repository>,
    pub active_repository: Option<PathBuf>,
}

impl RegistryState {
    /// Looks up a repository by exact path.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.path == path)
    }

    fn get_mut(&mut self, path: &Path) -> Option<&mut Repository> {
        self.repositories.iter_mut().find(|r| r.path == path)
    }

    /// The active repository entry.
    #[must_use]
    pub fn active(&self) -> Option<&Repository> {
        self.active_repository
            .as_deref()
            .and_then(|path| self.get(path))
    }

    /// Restores invariants after reading untrusted state.
    fn repair(&mut self) {
        let mut seen: Vec<PathBuf> = Vec::with_capacity(self.repositories.len());
        self.repositories.retain(|r| {
            if seen.contains(&r.path) {
                false
            } else {
                seen.push(r.path.clone());
                true
            }
        });

        for repo in &mut self.repositories {
            if repo.is_valid && !repo.path.exists() {
                debug!(path = %repo.path.display(), "repository path vanished, marking invalid");
                repo.is_valid = false;
            }
        }

        if let Some(active) = &self.active_repository
            && self.get(active).is_none()
        {
            warn!(path = %active.display(), "active repository not registered, clearing");
            self.active_repository = None;
        }
    }
}

/// Serialized envelope carrying the format version.
#[derive(Serialize)]
struct StateFileRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a RegistryState,
}

#[derive(Deserialize)]
struct StateFile {
    version: u32,
    #[serde(flatten)]
    state: RegistryState,
}

/// Thread-safe, file-backed repository registry.
#[derive(Debug)]
pub struct RepositoryRegistry {
    state_file: PathBuf,
    state: Mutex<RegistryState>,
}

impl RepositoryRegistry {
    /// Opens the registry at `state_file`, loading whatever is there.
    #[must_use]
    pub fn open(state_file: impl Into<PathBuf>) -> Self {
        let state_file = state_file.into();
        let state = read_state(&state_file);
        Self {
            state_file,
            state: Mutex::new(state),
        }
    }

    /// Path of the backing state file.
    #[must_use]
    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Re-reads the state file, replacing the in-memory state.
    ///
    /// Never fails: an absent or corrupt file yields an empty state.
    pub fn load(&self) -> RegistryState {
        let state = read_state(&self.state_file);
        *self.lock() = state.clone();
        state
    }

    /// Snapshot of the in-memory state.
    #[must_use]
    pub fn state(&self) -> RegistryState {
        self.lock().clone()
    }

    /// Registers `path` if it is not known yet.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::PersistFailed` if the state cannot be written.
    pub fn add_repository(&self, path: &Path) -> Result<RegistryState, RegistryError> {
        let path = normalize(path);
        self.mutate(|state| {
            if state.get(&path).is_none() {
                info!(path = %path.display(), "registered repository");
                state.repositories.push(Repository::unchecked(path.clone()));
            }
            Ok(())
        })
    }

    /// Makes `path` the active repository.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownRepository` if `path` was never added,
    /// or a persistence error.
    pub fn set_active(&self, path: &Path) -> Result<RegistryState, RegistryError> {
        let path = normalize(path);
        self.mutate(|state| {
            if state.get(&path).is_none() {
                return Err(RegistryError::UnknownRepository { path: path.clone() });
            }
            info!(path = %path.display(), "active repository changed");
            state.active_repository = Some(path.clone());
            Ok(())
        })
    }

    /// Forgets `path`, clearing the active selection if it pointed there.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownRepository` if `path` is not registered,
    /// or a persistence error.
    pub fn remove_repository(&self, path: &Path) -> Result<RegistryState, RegistryError> {
        let path = normalize(path);
        self.mutate(|state| {
            let before = state.repositories.len();
            state.repositories.retain(|r| r.path != path);
            if state.repositories.len() == before {
                return Err(RegistryError::UnknownRepository { path: path.clone() });
            }
            if state.active_repository.as_deref() == Some(path.as_path()) {
                state.active_repository = None;
            }
            info!(path = %path.display(), "removed repository");
            Ok(())
        })
    }

    /// Stores a validator verdict for `path` with the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownRepository` if `path` is not registered,
    /// or a persistence error.
    pub fn record_validation(
        &self,
        path: &Path,
        is_valid: bool,
    ) -> Result<RegistryState, RegistryError> {
        let path = normalize(path);
        let now = now_ms();
        self.mutate(|state| {
            let repo = state
                .get_mut(&path)
                .ok_or_else(|| RegistryError::UnknownRepository { path: path.clone() })?;
            repo.is_valid = is_valid;
            repo.last_checked_at = Some(now);
            Ok(())
        })
    }

    /// Atomically writes `state` to the state file.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Serialize` or `RegistryError::PersistFailed`.
    pub fn persist(&self, state: &RegistryState) -> Result<(), RegistryError> {
        let json = serde_json::to_vec_pretty(&StateFileRef {
            version: STATE_VERSION,
            state,
        })?;

        let persist_err = |source| RegistryError::PersistFailed {
            path: self.state_file.clone(),
            source,
        };

        let dir = match self.state_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(persist_err)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(persist_err)?;
        tmp.write_all(&json).map_err(persist_err)?;
        tmp.as_file().sync_all().map_err(persist_err)?;
        tmp.persist(&self.state_file)
            .map_err(|e| persist_err(e.error))?;

        debug!(path = %self.state_file.display(), "persisted registry");
        Ok(())
    }

    /// Applies `f` to a copy, persists it, then commits it to memory.
    fn mutate<F>(&self, f: F) -> Result<RegistryState, RegistryError>
    where
        F: FnOnce(&mut RegistryState) -> Result<(), RegistryError>,
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        f(&mut next)?;
        self.persist(&next)?;
        *guard = next.clone();
        Ok(next)
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads and repairs the state file, degrading to an empty state.
fn read_state(path: &Path) -> RegistryState {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no registry state file, starting empty");
            return RegistryState::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read registry state, starting empty");
            return RegistryState::default();
        }
    };

    match serde_json::from_slice::<StateFile>(&bytes) {
        Ok(file) if file.version == STATE_VERSION => {
            let mut state = file.state;
            state.repair();
            state
        }
        Ok(file) => {
            warn!(
                path = %path.display(),
                version = file.version,
                "unsupported registry state version, starting empty"
            );
            RegistryState::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt registry state, starting empty");
            RegistryState::default()
        }
    }
}

/// Makes `path` absolute relative to the current directory.
///
/// Lexical only; symlinks are kept as given.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
