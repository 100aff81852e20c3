//! Reader and writer options.

/// Options for reading snapshot files.
#[derive(Debug, Clone)]
pub struct SpstReaderOptions {
    /// Compare the body against the header checksum (default: true).
    pub verify_checksum: bool,
}

impl Default for SpstReaderOptions {
    fn default() -> Self {
        Self {
            verify_checksum: true,
        }
    }
}

impl SpstReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip checksum verification.
    ///
    /// Structural checks (truncation, counts, UTF-8) still apply.
    #[must_use]
    pub fn without_checksum(mut self) -> Self {
        self.verify_checksum = false;
        self
    }
}

/// Options for writing snapshot files.
#[derive(Debug, Clone)]
pub struct SpstWriterOptions {
    /// fsync the temporary file before it replaces the destination (default: true).
    pub sync: bool,
}

impl Default for SpstWriterOptions {
    fn default() -> Self {
        Self { sync: true }
    }
}

impl SpstWriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable fsync before rename.
    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}
