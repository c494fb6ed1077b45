//! Transport adapter seam.
//!
//! The stack does not own a socket. A transport (CoAP over UDP multicast
//! in the reference deployment) delivers typed requests through
//! [`InboundSink::on_request`] and ships back whatever serialized envelope
//! the one-shot `respond` closure receives. Framing, retransmission, and
//! multicast membership all live behind this trait.

use std::sync::Arc;

use thiserror::Error;

use ocstack_core::Request;

/// One-shot reply path back into the transport.
pub type RespondFn = Box<dyn FnOnce(String) + Send>;

/// Receives inbound requests from a transport.
pub trait InboundSink: Send + Sync {
    /// Handle one request. Implementations call `respond` at most once
    /// with the serialized response envelope; dropping it leaves the
    /// transport-level request unanswered.
    fn on_request(&self, request: Request, respond: RespondFn);
}

/// A pluggable datagram/message transport.
pub trait Transport {
    /// Begin delivering inbound requests to `sink`.
    fn start_listening(&mut self, sink: Arc<dyn InboundSink>) -> Result<(), TransportError>;

    /// Stop delivering requests. Idempotent.
    fn stop_listening(&mut self);
}

/// Failure to start or operate a transport.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);
