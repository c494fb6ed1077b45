//! Resource addressing for the ocstack M2M resource stack.
//!
//! Three layers, leaf-first:
//!
//! - [`HandleTable`] — an order-preserving table that owns items and
//!   issues stable, never-reused [`Handle`]s.
//! - [`UriTree`] — a segment-keyed trie mapping URI paths (with literal
//!   and regex-pattern segments) to values.
//! - [`ResourceRegistry`] — combines both so that a resource's URI→handle
//!   and handle→resource mappings can never drift apart.
//!
//! Literal segments always win over pattern segments at the same level;
//! between patterns, registration order is the tie-break.

#![forbid(unsafe_code)]

mod error;
mod handle_table;
mod registry;
mod uri_tree;

pub use error::RegistryError;
pub use handle_table::{Handle, HandleTable};
pub use registry::{Resource, ResourceRegistry, ResourceSpec};
pub use uri_tree::{Segment, UriTree};
