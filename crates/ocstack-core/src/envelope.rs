//! Wire-level response envelope.
//!
//! Every response the stack emits is an `oc` array of entries:
//!
//! - discovery: `{"oc":[{"href":"/a/led","prop":{"rt":["core.led"],"if":["core.rw"],"obs":1}}]}`
//! - GET:       `{"oc":[{"href":"/a/led","rep":{"state":false}}]}`
//! - PUT:       `{"oc":[{"rep":{"state":true}}]}` (no `href`, by convention)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in a response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The resource URI. Omitted for PUT responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Discovery metadata. Only present in discovery entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop: Option<Prop>,
    /// The representation. Absent in discovery entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep: Option<Value>,
}

impl Entry {
    /// A GET entry: `href` plus a representation (empty object when the
    /// handler returned nothing).
    #[must_use]
    pub fn read(href: impl Into<String>, rep: Option<Value>) -> Self {
        Self {
            href: Some(href.into()),
            prop: None,
            rep: Some(rep.unwrap_or_else(empty_rep)),
        }
    }

    /// A PUT entry: representation only, `href` intentionally omitted.
    #[must_use]
    pub fn write(rep: Option<Value>) -> Self {
        Self {
            href: None,
            prop: None,
            rep: Some(rep.unwrap_or_else(empty_rep)),
        }
    }

    /// A discovery entry: `href` plus metadata, no representation.
    #[must_use]
    pub fn discovery(href: impl Into<String>, prop: Prop) -> Self {
        Self {
            href: Some(href.into()),
            prop: Some(prop),
            rep: None,
        }
    }
}

/// Discovery metadata attached to an [`Entry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    /// Resource type names.
    pub rt: Vec<String>,
    /// Interface names.
    #[serde(rename = "if")]
    pub interfaces: Vec<String>,
    /// 1 if the resource is observable, 0 otherwise.
    pub obs: u8,
}

/// The wire envelope: an ordered list of entries under `oc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Response entries, in emission order.
    pub oc: Vec<Entry>,
}

impl Envelope {
    /// An envelope with no entries. Also the not-found response shape.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An envelope holding a single entry.
    #[must_use]
    pub fn single(entry: Entry) -> Self {
        Self { oc: vec![entry] }
    }

    /// Serialize to the wire JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Vec<Entry>> for Envelope {
    fn from(oc: Vec<Entry>) -> Self {
        Self { oc }
    }
}

fn empty_rep() -> Value {
    Value::Object(serde_json::Map::new())
}
