//! JSON file store bootstrap, load and save.
//!
//! # Responsibility
//! - Ensure the store file exists before any read.
//! - Decode/encode the whole collection on every call.
//!
//! # Invariants
//! - `initialize` never overwrites an existing file, even a corrupt one.
//! - `save` writes a sibling temp file and renames it over the store.

use super::{StoreError, StoreResult};
use crate::model::student::Student;
use log::{debug, error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const EMPTY_COLLECTION: &[u8] = b"[]";

/// Handle to one JSON store file. Holds no cached records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Ensures a store exists at `path`, creating it with an empty array.
    ///
    /// Safe to call at every process start.
    ///
    /// # Side effects
    /// - Creates missing parent directories.
    /// - Emits `store_init` logging events.
    pub fn initialize(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        info!(
            "event=store_init module=store status=start path={}",
            path.display()
        );

        if path.exists() {
            info!("event=store_init module=store status=ok created=false");
            return Ok(Self { path });
        }

        if let Some(parent) = non_empty_parent(&path) {
            fs::create_dir_all(parent).map_err(|err| {
                error!(
                    "event=store_init module=store status=error error_code=mkdir_failed error={}",
                    err
                );
                StoreError::io(parent, err)
            })?;
        }

        fs::write(&path, EMPTY_COLLECTION).map_err(|err| {
            error!(
                "event=store_init module=store status=error error_code=create_failed error={}",
                err
            );
            StoreError::io(&path, err)
        })?;

        info!("event=store_init module=store status=ok created=true");
        Ok(Self { path })
    }

    /// Reads and decodes the whole collection in stored order.
    pub fn load(&self) -> StoreResult<Vec<Student>> {
        let started_at = Instant::now();
        let bytes = fs::read(&self.path).map_err(|err| {
            error!(
                "event=store_load module=store status=error error_code=read_failed duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            StoreError::io(&self.path, err)
        })?;

        let records: Vec<Student> = serde_json::from_slice(&bytes).map_err(|err| {
            error!(
                "event=store_load module=store status=error error_code=corrupt duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            StoreError::corrupt(&self.path, err)
        })?;

        debug!(
            "event=store_load module=store status=ok records={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    /// Replaces the stored collection with `records`.
    ///
    /// The new content is written to a temp file in the same directory and
    /// renamed into place, so a later `load` sees either the old or the new
    /// collection, never a torn one.
    pub fn save(&self, records: &[Student]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_atomically(records) {
            Ok(()) => {
                debug!(
                    "event=store_save module=store status=ok records={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=write_failed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StoreError::io(&self.path, err))
            }
        }
    }

    fn write_atomically(&self, records: &[Student]) -> std::io::Result<()> {
        let encoded = encode_pretty(records)?;
        let dir = non_empty_parent(&self.path).unwrap_or_else(|| Path::new("."));
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&encoded)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

fn encode_pretty(records: &[Student]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(records, &mut serializer)?;
    Ok(out)
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}
