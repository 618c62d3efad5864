//! Domain models for the car directory.
//!
//! - [`Car`]: a single record, keyed by a caller-supplied `id`.
//! - [`CarPatch`]: a partial car used for PATCH requests, where every field
//!   except `id` may be left unset.

mod car;

pub use car::*;
