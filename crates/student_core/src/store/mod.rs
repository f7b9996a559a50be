//! Flat-file storage for the student collection.
//!
//! # Responsibility
//! - Create, read and replace the JSON document holding all records.
//! - Report storage failures as typed errors instead of panicking.
//!
//! # Invariants
//! - The file always holds the full collection as one JSON array.
//! - Saves replace the whole file; readers never see a partial write.
//! - No locking: two writers racing load/save can lose an update.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Store file unreachable, unreadable or unwritable.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Store content is not a valid serialized collection.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store I/O failed at `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "store content at `{}` is corrupt: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}
