use super::{Band, BandMaskConfig, BandMaskKernel, BandMasks, FrequencyCompoundConfig};
use super::{SamplingDescriptor, StreamMetadata};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::signal::backend::{RustFftBackend, SpectralBackend};
use crate::signal::traits::{BandMaskDesign, SpectralOperation};
use crate::signal::SpectralSample;
use core::fmt;
use ndarray::{Array, ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn};
use num_traits::Float;
use rustfft::num_complex::Complex;
use rustfft::FftNum;
use tracing::{debug, trace};

/// Frequency compounding transform.
///
/// Every lane along the last axis is transformed to the frequency domain, gated by each band
/// mask, brought back to the time domain and reduced to its magnitude. The output is the mean
/// of the band magnitudes, real and non-negative, with the input's shape.
///
/// The transform is configured once per stream geometry with
/// [`configure`](SpectralOperation::configure) and then applied to any number of batches with
/// [`process`](SpectralOperation::process).
///
/// # Examples
/// ```
/// use compound_rs::kernel::KernelLifecycle;
/// use compound_rs::signal::compound::{FrequencyCompound, FrequencyCompoundConfig, StreamMetadata};
/// use compound_rs::signal::traits::SpectralOperation;
/// use ndarray::array;
///
/// let config = FrequencyCompoundConfig::from_edges([(-2.0, 2.0)]);
/// let mut op: FrequencyCompound = FrequencyCompound::try_new(config).unwrap();
/// op.configure(StreamMetadata::new([4], 4.0)).unwrap();
///
/// let y = op.process(&array![1.0, 0.0, -1.0, 0.0]).unwrap();
/// assert!((y[0] - 1.0).abs() < 1e-12 && y[1].abs() < 1e-12);
/// ```
pub struct FrequencyCompound<F = f64, B = RustFftBackend>
where
    B: SpectralBackend<F>,
{
    bands: Vec<Band>,
    backend: B,
    state: Option<CompoundState<F, B::Plan>>,
}

/// Everything derived from one stream geometry. Replaced as a whole on reconfiguration.
struct CompoundState<F, P> {
    descriptor: SamplingDescriptor,
    masks: BandMasks<F>,
    plan: P,
}

impl<F, B> FrequencyCompound<F, B>
where
    F: FftNum + Float,
    B: SpectralBackend<F>,
{
    /// Build an unconfigured transform running on `backend`.
    pub fn with_backend(config: FrequencyCompoundConfig, backend: B) -> Result<Self, ConfigError> {
        if config.bands.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "bands" });
        }
        Ok(Self {
            bands: config.bands,
            backend,
            state: None,
        })
    }

    /// Configured bands, in processing order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Number of configured bands.
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Whether [`configure`](SpectralOperation::configure) has succeeded.
    pub fn is_configured(&self) -> bool {
        self.state.is_some()
    }

    /// Sampling descriptor of the current configuration.
    pub fn descriptor(&self) -> Option<SamplingDescriptor> {
        self.state.as_ref().map(|s| s.descriptor)
    }

    /// Masks of the current configuration.
    pub fn masks(&self) -> Option<&BandMasks<F>> {
        self.state.as_ref().map(|s| &s.masks)
    }

    /// Numeric backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn compound(
        &self,
        state: &CompoundState<F, B::Plan>,
        mut spectrum: ArrayD<Complex<F>>,
    ) -> Result<ArrayD<F>, ExecInvariantViolation> {
        let backend = &self.backend;
        backend.forward(&state.plan, &mut spectrum);

        let parts = state
            .masks
            .iter()
            .map(|mask| {
                let mut band = backend.apply_mask(&spectrum, mask);
                backend.inverse(&state.plan, &mut band);
                backend.magnitude(&band)
            })
            .collect::<Vec<_>>();
        let views = parts.iter().map(|p| p.view()).collect::<Vec<_>>();
        let stacked =
            ndarray::stack(Axis(0), &views).map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "band reconstructions disagree in shape",
            })?;

        backend
            .mean_axis(stacked.view(), Axis(0))
            .ok_or(ExecInvariantViolation::InvalidState {
                reason: "no band masks to average",
            })
    }
}

impl<F, B> KernelLifecycle for FrequencyCompound<F, B>
where
    F: FftNum + Float,
    B: SpectralBackend<F> + Default,
{
    type Config = FrequencyCompoundConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Self::with_backend(config, B::default())
    }
}

impl<F, B> SpectralOperation for FrequencyCompound<F, B>
where
    F: FftNum + Float,
    B: SpectralBackend<F>,
{
    type Real = F;

    fn configure(&mut self, metadata: StreamMetadata) -> Result<StreamMetadata, ConfigError> {
        let descriptor = metadata.sampling_descriptor()?;
        let masks: BandMasks<F> = BandMaskKernel::try_new(BandMaskConfig {
            sampling_frequency: descriptor.sampling_frequency(),
            sample_count: descriptor.sample_count(),
            bands: self.bands.clone(),
        })?
        .run()?;
        let plan = self.backend.plan(descriptor.sample_count())?;

        debug!(
            sample_count = descriptor.sample_count(),
            sampling_frequency = descriptor.sampling_frequency(),
            bands = masks.len(),
            "configured frequency compounding"
        );
        self.state = Some(CompoundState {
            descriptor,
            masks,
            plan,
        });
        Ok(metadata)
    }

    fn process<A, S, D>(
        &self,
        data: &ArrayBase<S, D>,
    ) -> Result<Array<F, D>, ExecInvariantViolation>
    where
        A: SpectralSample<F>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let state = self
            .state
            .as_ref()
            .ok_or(ExecInvariantViolation::NotConfigured)?;
        let expected = state.descriptor.sample_count();
        let got = data.shape().last().copied().unwrap_or(0);
        if data.ndim() == 0 || got != expected {
            return Err(ExecInvariantViolation::ShapeMismatch {
                arg: "data",
                expected,
                got,
            });
        }
        trace!(shape = ?data.shape(), bands = state.masks.len(), "compounding batch");

        let samples = data.iter().map(|&x| x.to_complex()).collect::<Vec<_>>();
        let spectrum = ArrayD::from_shape_vec(IxDyn(data.shape()), samples).map_err(|_| {
            ExecInvariantViolation::InvalidState {
                reason: "input samples do not fill the input shape",
            }
        })?;

        self.compound(state, spectrum)?
            .into_dimensionality::<D>()
            .map_err(|_| ExecInvariantViolation::InvalidState {
                reason: "compounded output lost the input dimensionality",
            })
    }
}

impl<F, B> fmt::Debug for FrequencyCompound<F, B>
where
    B: SpectralBackend<F> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyCompound")
            .field("bands", &self.bands)
            .field("backend", &self.backend)
            .field("descriptor", &self.state.as_ref().map(|s| s.descriptor))
            .finish()
    }
}
