//! Shared kernel substrate.
//!
//! Constructor validation and the error taxonomy used by every transform in the crate.

mod errors;
mod lifecycle;

pub use errors::*;
pub use lifecycle::*;
