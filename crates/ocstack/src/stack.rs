//! Stack facade.

use std::sync::{Arc, RwLock};

use tracing::{debug, error};

use ocstack_core::{DispatchError, Envelope, Request};
use ocstack_router::{Handle, RegistryError, Resource, ResourceRegistry, ResourceSpec};

use crate::config::StackConfig;
use crate::dispatch::{RequestDispatcher, read_lock, write_lock};
use crate::transport::{InboundSink, RespondFn};

/// An instance of the resource stack.
///
/// Owns the resource registry and the request dispatcher. Cloning a
/// `Stack` yields another handle to the same registry, so one clone can
/// be parked inside a transport while another keeps registering
/// resources.
///
/// ```
/// use ocstack::{Method, Properties, Request, ResourceSpec, Stack};
///
/// let stack = Stack::new();
/// stack
///     .register_resource(
///         ResourceSpec::new("/a/led")
///             .resource_type("core.led")
///             .interface("core.rw")
///             .properties(Properties::DISCOVERABLE),
///     )
///     .unwrap();
///
/// let envelope = stack.dispatch(&Request::new(Method::Get, "/a/led")).unwrap();
/// assert_eq!(envelope.oc.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Stack {
    registry: Arc<RwLock<ResourceRegistry>>,
    dispatcher: RequestDispatcher,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Create a stack with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StackConfig::default())
    }

    /// Create a stack with the given configuration.
    #[must_use]
    pub fn with_config(config: StackConfig) -> Self {
        let registry = Arc::new(RwLock::new(ResourceRegistry::new()));
        let dispatcher = RequestDispatcher::new(Arc::clone(&registry), config);
        Self {
            registry,
            dispatcher,
        }
    }

    /// Register a resource, returning its handle.
    pub fn register_resource(&self, spec: ResourceSpec) -> Result<Handle, RegistryError> {
        write_lock(&self.registry).register(spec)
    }

    /// Unregister a resource. A no-op for handles already removed.
    pub fn unregister_resource(&self, handle: Handle) -> Option<Resource> {
        write_lock(&self.registry).unregister(handle)
    }

    /// Resolve a URI to the handle of its registered resource.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<Handle> {
        read_lock(&self.registry).resolve(uri).map(|(h, _)| h)
    }

    /// Run a closure against the resource registered under `handle`.
    pub fn with_resource<R>(&self, handle: Handle, f: impl FnOnce(&Resource) -> R) -> Option<R> {
        read_lock(&self.registry).lookup(handle).map(f)
    }

    /// Run a closure against the resource mutably (property or handler
    /// updates).
    pub fn with_resource_mut<R>(
        &self,
        handle: Handle,
        f: impl FnOnce(&mut Resource) -> R,
    ) -> Option<R> {
        write_lock(&self.registry).lookup_mut(handle).map(f)
    }

    /// Count of registered resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        read_lock(&self.registry).len()
    }

    /// Handle one request, producing its response envelope.
    pub fn dispatch(&self, request: &Request) -> Result<Envelope, DispatchError> {
        self.dispatcher.dispatch(request)
    }

    /// Handle one request, producing the serialized wire response.
    pub fn dispatch_serialized(&self, request: &Request) -> Result<String, DispatchError> {
        Ok(self.dispatch(request)?.to_json()?)
    }

    /// The bulk discovery envelope, as served at the well-known URI.
    #[must_use]
    pub fn discover(&self) -> Envelope {
        self.dispatcher.discover()
    }
}

impl InboundSink for Stack {
    /// Bridge from a transport: dispatch and send the serialized
    /// envelope back. Requests that end in a dispatch error are logged
    /// and left unanswered at this layer; the transport's own timeout
    /// handling applies.
    fn on_request(&self, request: Request, respond: RespondFn) {
        match self.dispatch_serialized(&request) {
            Ok(json) => {
                debug!(uri = request.uri(), response = %json, "responding");
                respond(json);
            }
            Err(e) => {
                error!(uri = request.uri(), error = %e, "request dropped");
            }
        }
    }
}
