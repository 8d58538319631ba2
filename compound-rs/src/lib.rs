//! Frequency compounding for coherent imaging.
//!
//! Speckle in ultrasound and other coherent images varies with frequency. Splitting the spectrum
//! of every RF line into sub-bands, reconstructing each band and averaging the band envelopes
//! trades axial resolution for a smoother image.
//!
//! The transform follows a two-phase host contract: configure once per stream geometry, then
//! process batches.
//!
//! ```
//! use compound_rs::kernel::KernelLifecycle;
//! use compound_rs::signal::compound::{FrequencyCompound, FrequencyCompoundConfig, StreamMetadata};
//! use compound_rs::signal::traits::SpectralOperation;
//! use ndarray::Array2;
//!
//! let fs = 20.0e6;
//! let config = FrequencyCompoundConfig::from_edges([(-8.0e6, -2.0e6), (2.0e6, 8.0e6)]);
//! let mut op: FrequencyCompound<f32> = FrequencyCompound::try_new(config).unwrap();
//! op.configure(StreamMetadata::new([64, 512], fs)).unwrap();
//!
//! let rf = Array2::<i16>::zeros((64, 512));
//! let envelope = op.process(&rf).unwrap();
//! assert_eq!(envelope.shape(), &[64, 512]);
//! ```

#![deny(missing_docs)]

/// Kernel lifecycle and error taxonomy.
pub mod kernel;

/// Spectral transforms.
pub mod signal;
