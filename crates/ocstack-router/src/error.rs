//! Registration errors.

use thiserror::Error;

/// Errors surfaced by resource registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The URI exceeds the protocol's URI length limit.
    #[error("uri of {got} bytes exceeds limit of {limit}")]
    UriTooLong {
        /// Actual URI length.
        got: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The URI has no path segments.
    #[error("uri `{0}` has no path segments")]
    EmptyUri(String),

    /// A pattern segment was not a valid regular expression.
    #[error("invalid pattern segment `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
