use super::{Band, SamplingDescriptor};
use crate::kernel::{ConfigError, KernelLifecycle};
use crate::signal::traits::BandMaskDesign;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use num_traits::Float;
use tracing::warn;

/// Binary frequency-domain gates, one row per band, one column per FFT bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BandMasks<F> {
    frequencies: Array1<f64>,
    gates: Array2<F>,
}

impl<F> BandMasks<F> {
    /// Number of masks.
    pub fn len(&self) -> usize {
        self.gates.nrows()
    }

    /// Whether there are no masks. Never true for masks built by [`build_masks`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of every mask.
    pub fn sample_count(&self) -> usize {
        self.gates.ncols()
    }

    /// Mask of the `band`-th band.
    pub fn mask(&self, band: usize) -> Option<ArrayView1<'_, F>> {
        (band < self.len()).then(|| self.gates.index_axis(Axis(0), band))
    }

    /// Masks in band order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = ArrayView1<'_, F>> + '_ {
        self.gates.outer_iter()
    }

    /// All masks as a `(bands, sample_count)` matrix.
    pub fn as_matrix(&self) -> ArrayView2<'_, F> {
        self.gates.view()
    }

    /// Signed frequency of every bin the masks were built against.
    pub fn frequencies(&self) -> ArrayView1<'_, f64> {
        self.frequencies.view()
    }
}

/// Constructor config for [`BandMaskKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct BandMaskConfig {
    /// Sampling frequency of the transformed axis.
    pub sampling_frequency: f64,
    /// Number of samples along the transformed axis.
    pub sample_count: usize,
    /// Bands, in output order.
    pub bands: Vec<Band>,
}

/// Checked kernel wrapper for [`build_masks`].
#[derive(Debug, Clone, PartialEq)]
pub struct BandMaskKernel {
    descriptor: SamplingDescriptor,
    bands: Vec<Band>,
}

impl BandMaskKernel {
    /// Validated sampling descriptor.
    pub fn descriptor(&self) -> SamplingDescriptor {
        self.descriptor
    }
}

impl KernelLifecycle for BandMaskKernel {
    type Config = BandMaskConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let descriptor =
            SamplingDescriptor::try_new(config.sampling_frequency, config.sample_count)?;
        if config.bands.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "bands" });
        }
        Ok(Self {
            descriptor,
            bands: config.bands,
        })
    }
}

impl<F: Float> BandMaskDesign<F> for BandMaskKernel {
    fn run(&self) -> Result<BandMasks<F>, ConfigError> {
        let frequencies = self.descriptor.frequencies()?;
        let gates = Array2::from_shape_fn(
            (self.bands.len(), self.descriptor.sample_count()),
            |(b, k)| {
                if self.bands[b].contains(frequencies[k]) {
                    F::one()
                } else {
                    F::zero()
                }
            },
        );

        for (index, (band, gate)) in self.bands.iter().zip(gates.outer_iter()).enumerate() {
            if gate.iter().all(|g| g.is_zero()) {
                warn!(
                    band = index,
                    low = band.low,
                    high = band.high,
                    "band selects no frequency bin"
                );
            }
        }

        Ok(BandMasks { frequencies, gates })
    }
}

/// Build one binary frequency mask per band.
///
/// Bin `k` carries the signed frequency numpy's `fftfreq(sample_count, 1 / sampling_frequency)`
/// assigns to it; a mask is `1` where that frequency lies in `[low, high]` and `0` elsewhere.
/// No smoothing or normalization is applied.
///
/// # Errors
/// [`ConfigError`] when `sample_count` is zero, `sampling_frequency` is not a positive finite
/// number, or `bands` is empty.
///
/// # Examples
/// ```
/// use compound_rs::signal::compound::{build_masks, Band};
///
/// let masks = build_masks::<f64>(4.0, 4, &[Band::new(0.0, 2.0)]).unwrap();
/// // Bins carry frequencies [0, 1, -2, -1]; the Nyquist bin is negative.
/// assert_eq!(masks.mask(0).unwrap().to_vec(), vec![1.0, 1.0, 0.0, 0.0]);
/// ```
pub fn build_masks<F: Float>(
    sampling_frequency: f64,
    sample_count: usize,
    bands: &[Band],
) -> Result<BandMasks<F>, ConfigError> {
    let kernel = BandMaskKernel::try_new(BandMaskConfig {
        sampling_frequency,
        sample_count,
        bands: bands.to_vec(),
    })?;
    kernel.run()
}
