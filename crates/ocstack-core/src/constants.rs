//! Protocol constants.
//!
//! URI and size limits follow the reference stack configuration so that
//! envelopes produced here stay consumable by constrained peers.

/// Bulk discovery endpoint.
pub const OC_WELL_KNOWN_URI: &str = "/oc/core";
/// Device description endpoint (reserved).
pub const OC_DEVICE_URI: &str = "/oc/core/d";
/// Resource type listing endpoint (reserved).
pub const OC_RESOURCE_TYPES_URI: &str = "/oc/core/d/type";
/// Presence endpoint (reserved).
pub const OC_PRESENCE_URI: &str = "/oc/presence";

/// Maximum length of a serialized response envelope.
pub const MAX_RESPONSE_LENGTH: usize = 1024;
/// Maximum length of an inbound request body.
pub const MAX_REQUEST_LENGTH: usize = 1024;
/// Maximum length of a resource URI.
pub const MAX_URI_LENGTH: usize = 64;
/// Maximum length of a request query.
pub const MAX_QUERY_LENGTH: usize = 64;
/// Maximum number of resources contained in a collection resource.
pub const MAX_CONTAINED_RESOURCES: usize = 5;

/// Sentinel for resource attributes never set by the application.
pub const NOT_SET: &str = "NOT_SET";
