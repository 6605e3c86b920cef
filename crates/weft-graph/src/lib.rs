//! Dependency ordering and signal resolution for Weft sheets.
//!
//! Two pure subsystems over `weft-core` types:
//!
//! - [`order`]: topological sorting of a sheet's blocks with explicit
//!   cycle reporting and a documented authored-order fallback.
//! - [`resolve`]: gathering a block's per-handle input values from the
//!   outputs published earlier in the same tick.
//!
//! Neither module holds state; the engine calls both afresh every tick so
//! host edits to the sheet take effect immediately.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod index;
pub mod order;
pub mod resolve;

pub use index::index_by_id;
pub use order::{sort, sorted_or_authored};
pub use resolve::{dangling_connections, resolve_inputs};
