//! Error taxonomy.

use crate::Method;
use thiserror::Error;

/// Errors surfaced by the request dispatcher.
///
/// Resolution failures are deliberately *not* errors: an unknown URI
/// yields a well-formed empty envelope so resource existence is not
/// leaked at the protocol layer.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// PUT body could not be decoded, parsed, or failed the structural
    /// check. The handler was not invoked.
    #[error("payload rejected: {0}")]
    PayloadRejected(String),

    /// Inbound body exceeded the configured request length limit.
    #[error("request body of {got} bytes exceeds limit of {limit}")]
    RequestTooLarge {
        /// Actual body length.
        got: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The method is reserved but not implemented by the dispatcher.
    #[error("unsupported method: {0}")]
    MethodNotSupported(Method),

    /// A PUT handler did not complete its reply within the write timeout.
    #[error("write handler timed out after {0:?}")]
    WriteTimeout(std::time::Duration),

    /// A PUT handler dropped its reply without completing it.
    #[error("write handler abandoned its reply")]
    WriteAbandoned,

    /// The response envelope failed to serialize.
    #[error("envelope serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
