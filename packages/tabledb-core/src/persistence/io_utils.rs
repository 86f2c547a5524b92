//! Error classification and retry policy for database file I/O.

use std::ffi::OsString;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Maps an `io::Error` to the store error it represents, prefixing the
/// message with `context`.
///
/// Out-of-space conditions become [`StoreError::DiskFull`], interrupted or
/// would-block calls become [`StoreError::TransientIoError`] so that a
/// [`RetryPolicy`] repeats them, and everything else is a plain
/// [`StoreError::IoError`].
pub fn classify_io_error(error: io::Error, context: &str) -> StoreError {
    let message = format!("{}: {}", context, error);
    match error.kind() {
        ErrorKind::StorageFull | ErrorKind::OutOfMemory => StoreError::DiskFull(message),
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted => {
            StoreError::TransientIoError(message)
        }
        ErrorKind::InvalidData => StoreError::DataCorruption(message),
        _ => StoreError::IoError(message),
    }
}

/// Attaches a context message to `io::Result`s, classifying the error.
pub trait IoContext<T> {
    fn io_context(self, context: &str) -> Result<T, StoreError>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context(self, context: &str) -> Result<T, StoreError> {
        self.map_err(|e| classify_io_error(e, context))
    }
}

/// Path of the scratch file a save writes before renaming it over `path`.
///
/// The scratch file sits next to the target so the rename never crosses a
/// filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// How often and how patiently transient I/O failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            config.persistence_max_retries,
            Duration::from_millis(config.persistence_retry_delay_ms),
        )
    }

    /// Runs `operation` until it succeeds, fails with a non-transient
    /// error, or has been retried `max_retries` times.
    ///
    /// # Arguments
    /// * `context` - Operation name used in log messages
    /// * `operation` - Fallible step, called at least once
    pub fn run<T, F>(&self, context: &str, mut operation: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Result<T, StoreError>,
    {
        let mut retries = 0;
        loop {
            let err = match operation() {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !matches!(err, StoreError::TransientIoError(_)) || retries >= self.max_retries {
                return Err(err);
            }

            retries += 1;
            tracing::warn!(
                "Transient I/O error during {} (retry {}/{}): {}",
                context,
                retries,
                self.max_retries,
                err
            );
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}
