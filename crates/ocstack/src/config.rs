//! Stack configuration.

use std::time::Duration;

use ocstack_core::constants::{MAX_REQUEST_LENGTH, OC_WELL_KNOWN_URI};

/// Tunables for a [`Stack`](crate::Stack).
///
/// ```
/// use std::time::Duration;
/// use ocstack::StackConfig;
///
/// let config = StackConfig::new()
///     .write_timeout(Duration::from_secs(5))
///     .discover_all(false);
/// ```
#[derive(Debug, Clone)]
pub struct StackConfig {
    well_known_uri: String,
    write_timeout: Duration,
    max_request_length: usize,
    discover_all: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            well_known_uri: OC_WELL_KNOWN_URI.to_string(),
            write_timeout: Duration::from_secs(30),
            max_request_length: MAX_REQUEST_LENGTH,
            discover_all: false,
        }
    }
}

impl StackConfig {
    /// Create a configuration with protocol defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the bulk discovery URI (default `/oc/core`).
    #[must_use]
    pub fn well_known_uri(mut self, uri: impl Into<String>) -> Self {
        self.well_known_uri = uri.into();
        self
    }

    /// How long the dispatcher waits for a PUT handler to complete its
    /// reply before answering with a timeout error (default 30 s).
    #[must_use]
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Maximum accepted request body length in bytes (default 1024).
    #[must_use]
    pub fn max_request_length(mut self, limit: usize) -> Self {
        self.max_request_length = limit;
        self
    }

    /// When set, discovery lists every registered resource instead of
    /// only those flagged DISCOVERABLE (default off).
    #[must_use]
    pub fn discover_all(mut self, all: bool) -> Self {
        self.discover_all = all;
        self
    }

    /// The configured discovery URI.
    #[must_use]
    pub fn get_well_known_uri(&self) -> &str {
        &self.well_known_uri
    }

    /// The configured write timeout.
    #[must_use]
    pub fn get_write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// The configured body length limit.
    #[must_use]
    pub fn get_max_request_length(&self) -> usize {
        self.max_request_length
    }

    /// Whether discovery ignores the DISCOVERABLE flag.
    #[must_use]
    pub fn get_discover_all(&self) -> bool {
        self.discover_all
    }
}
