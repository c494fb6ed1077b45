//! Resource registry.
//!
//! [`ResourceRegistry`] owns both the handle table and the URI tree, so a
//! resource's URI→handle and handle→resource mappings are mutated through
//! one consistent pair of operations and can never drift apart.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use ocstack_core::constants::{MAX_URI_LENGTH, NOT_SET};
use ocstack_core::{DefaultHandler, Entry, Prop, Properties, ResourceHandler};

use crate::error::RegistryError;
use crate::handle_table::{Handle, HandleTable};
use crate::uri_tree::{Segment, UriTree};

/// Description of a resource to register.
///
/// Unset attributes fall back to the `NOT_SET` sentinel, empty property
/// flags, and a no-op handler.
pub struct ResourceSpec {
    uri: String,
    resource_type: Option<String>,
    interface: Option<String>,
    properties: Properties,
    handler: Option<Arc<dyn ResourceHandler>>,
}

impl ResourceSpec {
    /// Start a spec for the given URI or URI pattern.
    ///
    /// Segments containing regex metacharacters are treated as pattern
    /// segments; all others match literally.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            resource_type: None,
            interface: None,
            properties: Properties::empty(),
            handler: None,
        }
    }

    /// Set the resource type name (e.g. `core.led`).
    #[must_use]
    pub fn resource_type(mut self, rt: impl Into<String>) -> Self {
        self.resource_type = Some(rt.into());
        self
    }

    /// Set the interface name (e.g. `core.rw`).
    #[must_use]
    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Set the property flags.
    #[must_use]
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the handler invoked for requests targeting this resource.
    #[must_use]
    pub fn handler<H: ResourceHandler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Set an already-shared handler.
    #[must_use]
    pub fn shared_handler(mut self, handler: Arc<dyn ResourceHandler>) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl fmt::Debug for ResourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSpec")
            .field("uri", &self.uri)
            .field("resource_type", &self.resource_type)
            .field("interface", &self.interface)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// A registered resource.
pub struct Resource {
    uri: String,
    segments: Vec<Segment>,
    resource_type: String,
    interface: String,
    properties: Properties,
    handler: Arc<dyn ResourceHandler>,
}

impl Resource {
    /// The URI (or URI pattern) this resource was registered under.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The resource type name.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The property flags.
    #[must_use]
    pub fn properties(&self) -> Properties {
        self.properties
    }

    /// Mutable access to the property flags.
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// The handler bound to this resource.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn ResourceHandler> {
        &self.handler
    }

    /// Replace the handler.
    pub fn set_handler(&mut self, handler: Arc<dyn ResourceHandler>) {
        self.handler = handler;
    }

    /// The discovery entry for this resource.
    #[must_use]
    pub fn discovery_entry(&self) -> Entry {
        Entry::discovery(
            self.uri.clone(),
            Prop {
                rt: vec![self.resource_type.clone()],
                interfaces: vec![self.interface.clone()],
                obs: u8::from(self.properties.contains(Properties::OBSERVABLE)),
            },
        )
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("uri", &self.uri)
            .field("resource_type", &self.resource_type)
            .field("interface", &self.interface)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// The combined handle table + URI tree behind register/resolve.
///
/// Registration and removal mutate both structures together. Callers that
/// share a registry across threads serialize mutations behind a single
/// write lock and may run lookups concurrently under read locks.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: HandleTable<Resource>,
    routes: UriTree<Handle>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, returning its handle.
    ///
    /// Registering a second resource under an already-routed URI replaces
    /// the route and unregisters the prior resource, so the table never
    /// accumulates orphaned entries.
    pub fn register(&mut self, spec: ResourceSpec) -> Result<Handle, RegistryError> {
        if spec.uri.len() > MAX_URI_LENGTH {
            return Err(RegistryError::UriTooLong {
                got: spec.uri.len(),
                limit: MAX_URI_LENGTH,
            });
        }
        let segments = parse_uri(&spec.uri)?;
        if segments.is_empty() {
            return Err(RegistryError::EmptyUri(spec.uri));
        }

        let resource = Resource {
            uri: spec.uri,
            segments: segments.clone(),
            resource_type: spec.resource_type.unwrap_or_else(|| NOT_SET.to_string()),
            interface: spec.interface.unwrap_or_else(|| NOT_SET.to_string()),
            properties: spec.properties,
            handler: spec.handler.unwrap_or_else(|| Arc::new(DefaultHandler)),
        };
        let uri = resource.uri.clone();

        let handle = self.resources.add(resource);
        if let Some(prev) = self.routes.add(&segments, handle) {
            if prev != handle && self.resources.remove(prev).is_some() {
                debug!(%uri, replaced = %prev, "duplicate registration replaced prior resource");
            }
        }
        debug!(%uri, %handle, "resource registered");
        Ok(handle)
    }

    /// Unregister a resource by handle, returning it if it was present.
    ///
    /// Clears the route as well, provided it still points at this handle.
    /// Unregistering an absent handle is a no-op.
    pub fn unregister(&mut self, handle: Handle) -> Option<Resource> {
        let resource = self.resources.remove(handle)?;
        if self.routes.get(&resource.segments) == Some(&handle) {
            self.routes.remove(&resource.segments);
        }
        debug!(uri = %resource.uri, %handle, "resource unregistered");
        Some(resource)
    }

    /// Resolve a request URI to its resource.
    ///
    /// Literal segment matches take precedence over pattern matches at
    /// each level.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<(Handle, &Resource)> {
        let segments = path_segments(uri);
        let handle = *self.routes.lookup(&segments)?;
        self.resources.lookup(handle).map(|r| (handle, r))
    }

    /// Hierarchical resolution: the first resource registered along the
    /// URI's path, left to right, plus the depth reached during descent.
    #[must_use]
    pub fn resolve_prefix(&self, uri: &str) -> (Option<(Handle, &Resource)>, usize) {
        let segments = path_segments(uri);
        let (found, depth) = self.routes.along_path(&segments);
        let resolved = found
            .copied()
            .and_then(|h| self.resources.lookup(h).map(|r| (h, r)));
        (resolved, depth)
    }

    /// Look up a resource by handle.
    #[must_use]
    pub fn lookup(&self, handle: Handle) -> Option<&Resource> {
        self.resources.lookup(handle)
    }

    /// Mutable lookup by handle (property or handler updates).
    pub fn lookup_mut(&mut self, handle: Handle) -> Option<&mut Resource> {
        self.resources.lookup_mut(handle)
    }

    /// Discovery entries in registration order.
    ///
    /// When `only_discoverable` is set, resources without the
    /// DISCOVERABLE flag are skipped.
    #[must_use]
    pub fn discovery_entries(&self, only_discoverable: bool) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(self.resources.len());
        self.resources.for_each(|resource, _handle, _idx| {
            if !only_discoverable || resource.properties().contains(Properties::DISCOVERABLE) {
                entries.push(resource.discovery_entry());
            }
        });
        entries
    }

    /// Visit resources in registration order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&Resource, Handle, usize),
    {
        self.resources.for_each(f);
    }

    /// Count of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Split a URI into its non-empty path segments.
fn path_segments(uri: &str) -> Vec<&str> {
    uri.split('/').filter(|s| !s.is_empty()).collect()
}

/// Parse a URI (or URI pattern) into registration-key segments.
fn parse_uri(uri: &str) -> Result<Vec<Segment>, RegistryError> {
    path_segments(uri).into_iter().map(Segment::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocstack_core::{Method, Request, WriteReply};
    use serde_json::{Value, json};

    struct StateHandler(Value);

    impl ResourceHandler for StateHandler {
        fn read(&self, _req: &Request) -> Option<Value> {
            Some(self.0.clone())
        }

        fn write(&self, _rep: Value, _req: &Request, reply: WriteReply) {
            reply.complete(None);
        }
    }

    fn led_spec(uri: &str) -> ResourceSpec {
        ResourceSpec::new(uri)
            .resource_type("core.led")
            .interface("core.rw")
            .properties(Properties::DISCOVERABLE | Properties::OBSERVABLE)
            .handler(StateHandler(json!({"state": false})))
    }

    #[test]
    fn test_registration_round_trip() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.register(led_spec("/a/led")).unwrap();

        let (found, resource) = registry.resolve("/a/led").unwrap();
        assert_eq!(found, handle);
        assert_eq!(resource.uri(), "/a/led");
        assert_eq!(resource.resource_type(), "core.led");
        assert_eq!(resource.interface(), "core.rw");
        assert!(resource.properties().contains(Properties::DISCOVERABLE));
        assert!(resource.properties().contains(Properties::OBSERVABLE));
    }

    #[test]
    fn test_defaults_are_not_set_sentinels() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.register(ResourceSpec::new("/bare")).unwrap();
        let resource = registry.lookup(handle).unwrap();
        assert_eq!(resource.resource_type(), "NOT_SET");
        assert_eq!(resource.interface(), "NOT_SET");
        assert!(resource.properties().is_empty());
    }

    #[test]
    fn test_resolve_unknown_uri() {
        let registry = ResourceRegistry::new();
        assert!(registry.resolve("/not/registered").is_none());
    }

    #[test]
    fn test_unregister_is_idempotent_and_clears_route() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.register(led_spec("/a/led")).unwrap();

        assert!(registry.unregister(handle).is_some());
        assert!(registry.resolve("/a/led").is_none());
        assert!(registry.lookup(handle).is_none());
        // second call observes nothing
        assert!(registry.unregister(handle).is_none());
    }

    #[test]
    fn test_duplicate_uri_replaces_prior_resource() {
        let mut registry = ResourceRegistry::new();
        let first = registry.register(led_spec("/a/led")).unwrap();
        let second = registry
            .register(led_spec("/a/led").resource_type("core.led2"))
            .unwrap();

        assert_ne!(first, second);
        // the prior resource is gone from the table, not orphaned
        assert!(registry.lookup(first).is_none());
        assert_eq!(registry.len(), 1);

        let (found, resource) = registry.resolve("/a/led").unwrap();
        assert_eq!(found, second);
        assert_eq!(resource.resource_type(), "core.led2");
    }

    #[test]
    fn test_stale_unregister_leaves_replacement_route() {
        let mut registry = ResourceRegistry::new();
        let first = registry.register(led_spec("/a/led")).unwrap();
        let second = registry.register(led_spec("/a/led")).unwrap();

        // the first handle was already reclaimed by the duplicate
        // registration; unregistering it must not disturb the new route
        assert!(registry.unregister(first).is_none());
        assert_eq!(registry.resolve("/a/led").unwrap().0, second);
    }

    #[test]
    fn test_literal_beats_pattern_route() {
        let mut registry = ResourceRegistry::new();
        let wildcard = registry
            .register(led_spec("/a/.*").resource_type("core.any"))
            .unwrap();
        let literal = registry.register(led_spec("/a/led")).unwrap();

        assert_eq!(registry.resolve("/a/led").unwrap().0, literal);
        assert_eq!(registry.resolve("/a/fan").unwrap().0, wildcard);
    }

    #[test]
    fn test_discovery_order_preserved_across_remove_and_readd() {
        let mut registry = ResourceRegistry::new();
        registry.register(led_spec("/r/1")).unwrap();
        let r2 = registry.register(led_spec("/r/2")).unwrap();
        registry.register(led_spec("/r/3")).unwrap();

        registry.unregister(r2);
        registry.register(led_spec("/r/2")).unwrap();

        let hrefs: Vec<_> = registry
            .discovery_entries(true)
            .into_iter()
            .map(|e| e.href.unwrap())
            .collect();
        assert_eq!(hrefs, vec!["/r/1", "/r/3", "/r/2"]);
    }

    #[test]
    fn test_discovery_filtering() {
        let mut registry = ResourceRegistry::new();
        registry.register(led_spec("/a/led")).unwrap();
        registry
            .register(
                ResourceSpec::new("/a/hidden")
                    .resource_type("core.hidden")
                    .properties(Properties::ACTIVE),
            )
            .unwrap();

        assert_eq!(registry.discovery_entries(true).len(), 1);
        assert_eq!(registry.discovery_entries(false).len(), 2);
    }

    #[test]
    fn test_discovery_entry_obs_flag() {
        let mut registry = ResourceRegistry::new();
        registry.register(led_spec("/a/led")).unwrap();
        registry
            .register(
                ResourceSpec::new("/a/static")
                    .resource_type("core.static")
                    .interface("core.r")
                    .properties(Properties::DISCOVERABLE),
            )
            .unwrap();

        let entries = registry.discovery_entries(true);
        assert_eq!(entries[0].prop.as_ref().unwrap().obs, 1);
        assert_eq!(entries[1].prop.as_ref().unwrap().obs, 0);
    }

    #[test]
    fn test_resolve_prefix() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.register(led_spec("/oc/core")).unwrap();

        let (found, depth) = registry.resolve_prefix("/oc/core/d/type");
        assert_eq!(found.unwrap().0, handle);
        assert_eq!(depth, 2);

        let (missing, depth) = registry.resolve_prefix("/other/path");
        assert!(missing.is_none());
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_uri_too_long_rejected() {
        let mut registry = ResourceRegistry::new();
        let uri = format!("/{}", "x".repeat(MAX_URI_LENGTH));
        let err = registry.register(ResourceSpec::new(uri)).unwrap_err();
        assert!(matches!(err, RegistryError::UriTooLong { .. }));
    }

    #[test]
    fn test_empty_uri_rejected() {
        let mut registry = ResourceRegistry::new();
        assert!(matches!(
            registry.register(ResourceSpec::new("/")),
            Err(RegistryError::EmptyUri(_))
        ));
    }

    #[test]
    fn test_property_mutation_through_registry() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.register(led_spec("/a/led")).unwrap();

        registry
            .lookup_mut(handle)
            .unwrap()
            .properties_mut()
            .remove(Properties::DISCOVERABLE);
        assert!(registry.discovery_entries(true).is_empty());
    }
}
