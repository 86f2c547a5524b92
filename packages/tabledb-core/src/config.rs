//! Store configuration.

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum retry attempts for transient I/O errors
    pub persistence_max_retries: u32,
    /// Delay between retry attempts in milliseconds
    pub persistence_retry_delay_ms: u64,
    /// Flush file contents to disk before `save` returns
    pub sync_on_save: bool,
    /// Reject names and cell values containing codec delimiters
    pub reject_reserved_characters: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persistence_max_retries: 3,      // Default retry attempts
            persistence_retry_delay_ms: 100, // 100ms delay between retries
            sync_on_save: true,
            reject_reserved_characters: true,
        }
    }
}
