//! Database file load, save and removal.
//!
//! Every call opens the backing file, reads or writes it completely and
//! closes it before returning, on success and on failure alike.

pub mod codec;
pub mod io_utils;


use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::config::StoreConfig;
use crate::database::Database;
use crate::error::StoreError;

use io_utils::{IoContext, RetryPolicy};

/// Persistence manager for database files.
#[derive(Debug, Clone)]
pub struct PersistenceManager {
    /// Retry behavior for transient I/O errors
    retry: RetryPolicy,
    /// Whether to fsync after writing
    sync_on_save: bool,
}

impl PersistenceManager {
    /// Creates a new persistence manager with the given configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            retry: RetryPolicy::from_config(config),
            sync_on_save: config.sync_on_save,
        }
    }

    /// Loads a database from the file at `path`.
    ///
    /// # Arguments
    /// * `path` - Database file location
    ///
    /// # Returns
    /// `Result<Database, StoreError>` containing the decoded database.
    pub fn load(&self, path: &Path) -> Result<Database, StoreError> {
        let contents = self.retry.run("database load", || read_file(path))?;

        tracing::debug!("Read {} bytes from {}", contents.len(), path.display());

        codec::decode(&contents, path)
    }

    /// Saves a database to its recorded path, replacing any existing file.
    ///
    /// The encoded database goes to a sibling `.tmp` file first and is
    /// renamed over the target only once fully written, so a failed save
    /// leaves the previous file untouched.
    ///
    /// # Arguments
    /// * `db` - Database to save
    ///
    /// # Returns
    /// `Result<(), StoreError>` indicating success or failure.
    pub fn save(&self, db: &Database) -> Result<(), StoreError> {
        let encoded = codec::encode(db);

        self.retry.run("database save", || {
            write_replacing(&db.path, self.sync_on_save, |writer| {
                writer.write_all(encoded.as_bytes())
            })
        })?;

        tracing::debug!("Wrote {} bytes to {}", encoded.len(), db.path.display());
        Ok(())
    }

    /// Removes the database file at `path`.
    ///
    /// An empty path or a file that does not exist is not an error.
    pub fn remove(&self, path: &Path) -> Result<(), StoreError> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        self.retry.run("database removal", || match fs::remove_file(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No file to remove at {}", path.display());
                Ok(())
            }
            other => other.io_context("Failed to remove database file"),
        })
    }
}

fn read_file(path: &Path) -> Result<String, StoreError> {
    let file = File::open(path).io_context("Failed to open database file")?;
    let mut contents = String::new();
    BufReader::new(file)
        .read_to_string(&mut contents)
        .io_context("Failed to read database file")?;
    Ok(contents)
}

/// Writes a new version of `path` through `fill` and swaps it in.
///
/// On any failure the scratch file is removed and `path` is left as it was.
fn write_replacing<F>(path: &Path, sync: bool, fill: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let temp = io_utils::temp_path(path);

    let result = write_temp(&temp, sync, fill)
        .and_then(|()| fs::rename(&temp, path).io_context("Failed to replace database file"));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&temp) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", temp.display(), e);
            }
        }
    }
    result
}

fn write_temp<F>(temp: &Path, sync: bool, fill: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(temp).io_context("Failed to create database file")?;
    let mut writer = BufWriter::new(file);
    fill(&mut writer).io_context("Failed to write database file")?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .io_context("Failed to flush database file")?;
    if sync {
        file.sync_all().io_context("Failed to sync database file")?;
    }
    Ok(())
}
