//! Core types for the ocstack M2M resource stack.
//!
//! This crate provides the fundamental building blocks shared by the
//! routing and dispatch layers:
//! - [`Method`] and the [`Properties`] resource bit-set
//! - [`Request`] carrying an inbound method, URI, and raw body
//! - The wire envelope types ([`Envelope`], [`Entry`], [`Prop`])
//! - [`ResourceHandler`] behavior and its one-shot [`WriteReply`]
//! - Protocol constants ([`constants`])
//! - The dispatch error taxonomy ([`DispatchError`])
//!
//! # Design Principles
//!
//! - Plain owned types, no lifetimes at the API surface
//! - Wire shapes expressed once, via serde derives
//! - Errors are explicit enums; nothing panics on malformed input

#![forbid(unsafe_code)]

pub mod constants;
mod envelope;
mod error;
mod handler;
mod method;
mod properties;
mod request;

pub use envelope::{Entry, Envelope, Prop};
pub use error::DispatchError;
pub use handler::{DefaultHandler, ResourceHandler, WriteReply};
pub use method::{Method, UnknownMethod};
pub use properties::Properties;
pub use request::Request;
