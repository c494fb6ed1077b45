//! Request methods.

use std::fmt;
use std::str::FromStr;

/// RESTful request method.
///
/// Only [`Method::Get`] and [`Method::Put`] are dispatched by the stack;
/// the remaining values are reserved by the protocol for future use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a representation.
    Get,
    /// Write a representation.
    Put,
    /// Update (reserved).
    Post,
    /// Delete (reserved).
    Delete,
    /// Register for notifications (reserved).
    Observe,
    /// Subscribe to presence notifications (reserved).
    Presence,
}

impl Method {
    /// The method name as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Observe => "OBSERVE",
            Self::Presence => "PRESENCE",
        }
    }

    /// The protocol bit reserved for this method.
    ///
    /// Matches the `OC_REST_*` bitmask layout so method sets can be
    /// expressed as a single byte.
    #[must_use]
    pub fn mask(&self) -> u8 {
        match self {
            Self::Get => 1 << 0,
            Self::Put => 1 << 1,
            Self::Post => 1 << 2,
            Self::Delete => 1 << 3,
            Self::Observe => 1 << 4,
            Self::Presence => 1 << 6,
        }
    }

    /// Whether the dispatcher implements this method.
    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Get | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            "OBSERVE" => Ok(Self::Observe),
            "PRESENCE" => Ok(Self::Presence),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for method in [
            Method::Get,
            Method::Put,
            Method::Post,
            Method::Delete,
            Method::Observe,
            Method::Presence,
        ] {
            assert_eq!(method.as_str().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn test_unknown_method() {
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_reserved_masks_are_distinct() {
        let masks = [
            Method::Get.mask(),
            Method::Put.mask(),
            Method::Post.mask(),
            Method::Delete.mask(),
            Method::Observe.mask(),
            Method::Presence.mask(),
        ];
        for (i, a) in masks.iter().enumerate() {
            for b in &masks[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_only_get_and_put_dispatched() {
        assert!(Method::Get.is_dispatched());
        assert!(Method::Put.is_dispatched());
        assert!(!Method::Post.is_dispatched());
        assert!(!Method::Observe.is_dispatched());
    }
}
