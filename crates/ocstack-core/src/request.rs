//! Inbound request.

use crate::Method;

/// A typed inbound request, as delivered by a transport adapter.
///
/// The stack does not interpret the body here; PUT payload parsing happens
/// in the dispatcher, after the target resource has been resolved.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    payload: Vec<u8>,
}

impl Request {
    /// Create a request with an empty body.
    #[must_use]
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            payload: Vec::new(),
        }
    }

    /// Attach a raw body.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The target URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The raw body bytes. Empty for bodiless requests.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accessors() {
        let req = Request::new(Method::Put, "/a/led").with_payload(b"{}".to_vec());
        assert_eq!(req.method(), Method::Put);
        assert_eq!(req.uri(), "/a/led");
        assert_eq!(req.payload(), b"{}");
    }

    #[test]
    fn test_default_payload_is_empty() {
        let req = Request::new(Method::Get, "/a/led");
        assert!(req.payload().is_empty());
    }
}
