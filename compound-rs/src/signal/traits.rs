//! Trait interfaces for spectral capabilities.
//!
//! Hosts compose transforms through these traits; concrete transforms are picked at
//! composition time.

use crate::kernel::{ConfigError, ExecInvariantViolation};
use crate::signal::compound::{BandMasks, StreamMetadata};
use crate::signal::SpectralSample;
use ndarray::{Array, ArrayBase, Data, DataMut, Dimension};

/// Two-phase host operation over batches whose last axis is a time/depth axis.
///
/// `configure` runs once per stream geometry and must complete before `process` is called.
/// `process` does not mutate the operation, so a configured operation may be shared between
/// threads processing separate batches.
pub trait SpectralOperation {
    /// Real output element type.
    type Real: Copy;

    /// Prepare internal state for a stream and return the metadata describing the output.
    fn configure(&mut self, metadata: StreamMetadata) -> Result<StreamMetadata, ConfigError>;

    /// Transform one batch, allocating the output.
    fn process<A, S, D>(
        &self,
        data: &ArrayBase<S, D>,
    ) -> Result<Array<Self::Real, D>, ExecInvariantViolation>
    where
        A: SpectralSample<Self::Real>,
        S: Data<Elem = A>,
        D: Dimension;

    /// Transform one batch into a caller-provided output of identical shape.
    fn process_into<A, S, S2, D>(
        &self,
        data: &ArrayBase<S, D>,
        out: &mut ArrayBase<S2, D>,
    ) -> Result<(), ExecInvariantViolation>
    where
        A: SpectralSample<Self::Real>,
        S: Data<Elem = A>,
        S2: DataMut<Elem = Self::Real>,
        D: Dimension,
    {
        if out.shape() != data.shape() {
            return Err(ExecInvariantViolation::OutputShapeMismatch {
                expected: data.shape().to_vec(),
                got: out.shape().to_vec(),
            });
        }
        let y = self.process(data)?;
        out.assign(&y);
        Ok(())
    }
}

/// Frequency-domain band mask design capability.
pub trait BandMaskDesign<F> {
    /// Build one mask per configured band, in band order.
    fn run(&self) -> Result<BandMasks<F>, ConfigError>;
}
