//! Request dispatch.
//!
//! The dispatcher applies the per-method protocol rules: discovery
//! short-circuits resolution, GET is a single synchronous round-trip, and
//! PUT parses and validates the incoming representation before invoking
//! the handler, then waits on the handler's one-shot reply.

use std::sync::mpsc::RecvTimeoutError;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use ocstack_core::{
    DispatchError, Entry, Envelope, Method, Request, ResourceHandler, WriteReply,
};
use ocstack_router::ResourceRegistry;

use crate::config::StackConfig;

/// Resolves inbound requests against a shared registry and produces
/// response envelopes.
///
/// Lookups take the registry's read lock; handler invocations happen with
/// the lock released, so a handler may register or unregister resources
/// without deadlocking.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    registry: Arc<RwLock<ResourceRegistry>>,
    config: StackConfig,
}

impl RequestDispatcher {
    /// Create a dispatcher over a shared registry.
    #[must_use]
    pub fn new(registry: Arc<RwLock<ResourceRegistry>>, config: StackConfig) -> Self {
        Self { registry, config }
    }

    /// Handle one inbound request, producing its response envelope.
    ///
    /// An unknown URI is not an error: both GET and PUT answer with an
    /// empty envelope so resource existence is not leaked. Errors are
    /// reserved for rejected payloads, unsupported methods, and write
    /// handlers that never complete.
    pub fn dispatch(&self, request: &Request) -> Result<Envelope, DispatchError> {
        debug!(method = %request.method(), uri = request.uri(), "request received");

        if request.uri() == self.config.get_well_known_uri() {
            return Ok(self.discover());
        }

        match request.method() {
            Method::Get => Ok(self.dispatch_get(request)),
            Method::Put => self.dispatch_put(request),
            other => {
                warn!(method = %other, uri = request.uri(), "unsupported method");
                Err(DispatchError::MethodNotSupported(other))
            }
        }
    }

    /// The bulk discovery envelope.
    #[must_use]
    pub fn discover(&self) -> Envelope {
        let registry = read_lock(&self.registry);
        Envelope::from(registry.discovery_entries(!self.config.get_discover_all()))
    }

    fn dispatch_get(&self, request: &Request) -> Envelope {
        let Some(handler) = self.handler_for(request.uri()) else {
            debug!(uri = request.uri(), "resource not found");
            return Envelope::empty();
        };
        let rep = handler.read(request);
        Envelope::single(Entry::read(request.uri(), rep))
    }

    fn dispatch_put(&self, request: &Request) -> Result<Envelope, DispatchError> {
        let Some(handler) = self.handler_for(request.uri()) else {
            debug!(uri = request.uri(), "resource not found");
            return Ok(Envelope::empty());
        };

        let limit = self.config.get_max_request_length();
        if request.payload().len() > limit {
            return Err(DispatchError::RequestTooLarge {
                got: request.payload().len(),
                limit,
            });
        }

        let entry = crate::payload::parse_put_payload(request.payload()).inspect_err(|e| {
            warn!(uri = request.uri(), error = %e, "rejected PUT payload");
        })?;
        let rep = crate::payload::representation(&entry);

        let (reply, rx) = WriteReply::channel();
        handler.write(rep, request, reply);

        let timeout = self.config.get_write_timeout();
        match rx.recv_timeout(timeout) {
            Ok(result) => Ok(Envelope::single(Entry::write(result))),
            Err(RecvTimeoutError::Timeout) => {
                warn!(uri = request.uri(), ?timeout, "write handler timed out");
                Err(DispatchError::WriteTimeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!(uri = request.uri(), "write handler abandoned its reply");
                Err(DispatchError::WriteAbandoned)
            }
        }
    }

    /// Resolve a URI to its handler, releasing the registry lock before
    /// returning.
    fn handler_for(&self, uri: &str) -> Option<Arc<dyn ResourceHandler>> {
        let registry = read_lock(&self.registry);
        registry
            .resolve(uri)
            .map(|(_, resource)| Arc::clone(resource.handler()))
    }
}

/// Acquire the registry read lock, recovering from poisoning.
///
/// The registry holds no invariants that can be half-applied by a
/// panicking reader, so a poisoned lock is still usable.
pub(crate) fn read_lock(
    registry: &RwLock<ResourceRegistry>,
) -> std::sync::RwLockReadGuard<'_, ResourceRegistry> {
    registry.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire the registry write lock, recovering from poisoning.
pub(crate) fn write_lock(
    registry: &RwLock<ResourceRegistry>,
) -> std::sync::RwLockWriteGuard<'_, ResourceRegistry> {
    registry.write().unwrap_or_else(PoisonError::into_inner)
}
