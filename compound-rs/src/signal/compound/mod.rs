//! Frequency compounding for speckle reduction.
//!
//! The spectrum of every time/depth line is split into sub-bands, each band is brought back to
//! the time domain, and the band magnitudes are averaged incoherently. Speckle patterns
//! decorrelate across bands, so the average is smoother than any single-band envelope.

mod bands;
mod frequency;
mod masks;
mod metadata;

pub use bands::*;
pub use frequency::*;
pub use masks::*;
pub use metadata::*;
