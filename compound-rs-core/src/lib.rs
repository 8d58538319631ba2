//! Core helpers shared by `compound-rs`.
//!
//! Mirrors the small subset of numpy needed to lay out a discrete frequency axis.

#![deny(missing_docs)]

/// numpy-compatible array helpers.
pub mod num_rs;

mod error;

pub use error::{Error, Result};
