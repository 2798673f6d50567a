//! To-do document repository contracts and storage-slot implementations.
//!
//! # Responsibility
//! - Provide load/persist APIs over the single persisted to-do document.
//! - Keep file IO and JSON codec details inside the persistence boundary.
//!
//! # Invariants
//! - `load` returns `Ok(None)` only when the slot has never been written.
//! - `persist` overwrites the slot with the full serialized document.

use crate::model::todo::Divider;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for document load and persist operations.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted to-do document: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage-slot interface for the persisted to-do document.
///
/// The document is one JSON array of dividers; every persist replaces it
/// wholesale and every load reads it back in full.
pub trait TodoRepository {
    /// Reads the persisted document.
    ///
    /// # Errors
    /// - `RepoError::InvalidData` when the slot holds malformed content.
    /// - `RepoError::Io` on transport failure.
    fn load(&self) -> RepoResult<Option<Vec<Divider>>>;

    /// Overwrites the slot with the full serialized document.
    fn persist(&self, dividers: &[Divider]) -> RepoResult<()>;
}

/// A borrowed repository is itself a repository, so a caller can hand a
/// service `&repo` and keep inspecting the slot from outside.
impl<T: TodoRepository + ?Sized> TodoRepository for &T {
    fn load(&self) -> RepoResult<Option<Vec<Divider>>> {
        (**self).load()
    }

    fn persist(&self, dividers: &[Divider]) -> RepoResult<()> {
        (**self).persist(dividers)
    }
}

fn decode_document(raw: &str) -> RepoResult<Vec<Divider>> {
    serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("document does not parse: {err}")))
}

fn encode_document(dividers: &[Divider]) -> RepoResult<String> {
    serde_json::to_string(dividers)
        .map_err(|err| RepoError::InvalidData(format!("document does not serialize: {err}")))
}

/// File-backed storage slot: one JSON document at a fixed path.
pub struct JsonFileTodoRepository {
    path: PathBuf,
}

impl JsonFileTodoRepository {
    /// Creates a repository over the given document path.
    ///
    /// The path is not touched until the first `load` or `persist` call.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TodoRepository for JsonFileTodoRepository {
    fn load(&self) -> RepoResult<Option<Vec<Divider>>> {
        let started_at = Instant::now();

        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=document_load module=repo status=ok mode=file outcome=absent duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match decode_document(&raw) {
            Ok(dividers) => {
                info!(
                    "event=document_load module=repo status=ok mode=file dividers={} duration_ms={}",
                    dividers.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(dividers))
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn persist(&self, dividers: &[Divider]) -> RepoResult<()> {
        let started_at = Instant::now();
        let raw = encode_document(dividers)?;

        match std::fs::write(&self.path, raw) {
            Ok(()) => {
                info!(
                    "event=document_persist module=repo status=ok mode=file dividers={} duration_ms={}",
                    dividers.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=document_persist module=repo status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// In-memory storage slot holding the serialized document.
///
/// Runs the same JSON codec as the file backend so round-trip behavior is
/// identical, which makes it the substitution point for tests.
#[derive(Default)]
pub struct MemoryTodoRepository {
    slot: Mutex<Option<String>>,
}

impl MemoryTodoRepository {
    /// Creates an empty storage slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw document content.
    ///
    /// Used to stage malformed or legacy content for load-path tests.
    pub fn with_raw_document(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Returns a copy of the raw serialized document, if any was persisted.
    pub fn raw_document(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TodoRepository for MemoryTodoRepository {
    fn load(&self) -> RepoResult<Option<Vec<Divider>>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_deref() {
            Some(raw) => Ok(Some(decode_document(raw)?)),
            None => Ok(None),
        }
    }

    fn persist(&self, dividers: &[Divider]) -> RepoResult<()> {
        let raw = encode_document(dividers)?;
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(raw);
        Ok(())
    }
}
