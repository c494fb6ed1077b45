//! Lightweight OIC/CoAP-style machine-to-machine resource stack.
//!
//! ocstack implements the resource-registration and request-routing core
//! of an OIC-style device stack: named, typed resources exposed under
//! URIs, discoverable in bulk at `/oc/core`, and individually readable
//! and writable via GET/PUT with JSON representations.
//!
//! # Quick Start
//!
//! ```
//! use ocstack::{
//!     Method, Properties, Request, ResourceHandler, ResourceSpec, Stack, WriteReply,
//! };
//! use serde_json::{Value, json};
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! struct Led(AtomicBool);
//!
//! impl ResourceHandler for Led {
//!     fn read(&self, _req: &Request) -> Option<Value> {
//!         Some(json!({"state": self.0.load(Ordering::SeqCst)}))
//!     }
//!
//!     fn write(&self, rep: Value, _req: &Request, reply: WriteReply) {
//!         if let Some(state) = rep.get("state").and_then(Value::as_bool) {
//!             self.0.store(state, Ordering::SeqCst);
//!         }
//!         reply.complete(Some(json!({"state": self.0.load(Ordering::SeqCst)})));
//!     }
//! }
//!
//! let stack = Stack::new();
//! stack
//!     .register_resource(
//!         ResourceSpec::new("/a/led")
//!             .resource_type("core.led")
//!             .interface("core.rw")
//!             .properties(Properties::DISCOVERABLE | Properties::OBSERVABLE)
//!             .handler(Led(AtomicBool::new(false))),
//!     )
//!     .unwrap();
//!
//! let put = Request::new(Method::Put, "/a/led")
//!     .with_payload(br#"{"oc":[{"rep":{"state":true}}]}"#.to_vec());
//! let response = stack.dispatch_serialized(&put).unwrap();
//! assert_eq!(response, r#"{"oc":[{"rep":{"state":true}}]}"#);
//! ```
//!
//! # Crate Structure
//!
//! - [`ocstack_core`] — wire types, methods, properties, handlers
//! - [`ocstack_router`] — handle table, URI tree, resource registry
//! - this crate — the [`Stack`] facade, [`RequestDispatcher`], payload
//!   parsing, and the [`Transport`] adapter seam

#![forbid(unsafe_code)]

mod config;
mod dispatch;
mod payload;
mod stack;
mod transport;

pub use config::StackConfig;
pub use dispatch::RequestDispatcher;
pub use stack::Stack;
pub use transport::{InboundSink, RespondFn, Transport, TransportError};

// Re-export crates
pub use ocstack_core as core;
pub use ocstack_router as router;

// Re-export commonly used types
pub use ocstack_core::{
    DefaultHandler, DispatchError, Entry, Envelope, Method, Prop, Properties, Request,
    ResourceHandler, WriteReply, constants,
};
pub use ocstack_router::{
    Handle, HandleTable, RegistryError, Resource, ResourceRegistry, ResourceSpec, Segment, UriTree,
};
