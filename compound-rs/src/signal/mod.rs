//! Spectral transforms over `ndarray` batches.

/// Numeric runtime backing the transforms.
pub mod backend;

/// Frequency compounding.
pub mod compound;

/// Capability traits.
pub mod traits;

mod sample;

pub use sample::SpectralSample;
