//! Numeric array runtime used by spectral operations.
//!
//! Transforms only talk to a [`SpectralBackend`], so the same transform logic runs against the
//! in-memory [`RustFftBackend`] or any accelerated implementation of the trait.

use crate::kernel::ConfigError;
use core::fmt;
use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis};
use num_traits::Float;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftNum, FftPlanner, Length};
use std::sync::Arc;

/// Spectral primitives along the last axis of n-dimensional arrays.
///
/// Every method receiving a `plan` expects arrays whose last axis has the planned length.
pub trait SpectralBackend<F>: Send + Sync {
    /// Reusable per-geometry state, built once at configuration time.
    type Plan: Send + Sync;

    /// Prepare forward and inverse transforms of length `len`.
    fn plan(&self, len: usize) -> Result<Self::Plan, ConfigError>;

    /// In-place forward transform of every lane along the last axis.
    fn forward(&self, plan: &Self::Plan, data: &mut ArrayD<Complex<F>>);

    /// In-place inverse transform of every lane along the last axis, normalized by `1/len`.
    fn inverse(&self, plan: &Self::Plan, data: &mut ArrayD<Complex<F>>);

    /// Multiply `spectrum` by a real `mask` broadcast over the leading axes.
    fn apply_mask(
        &self,
        spectrum: &ArrayD<Complex<F>>,
        mask: ArrayView1<'_, F>,
    ) -> ArrayD<Complex<F>>;

    /// Elementwise magnitude.
    fn magnitude(&self, data: &ArrayD<Complex<F>>) -> ArrayD<F>;

    /// Arithmetic mean along `axis`. `None` when the axis is empty.
    fn mean_axis(&self, data: ArrayViewD<'_, F>, axis: Axis) -> Option<ArrayD<F>>;
}

/// Planned forward/inverse transform pair for [`RustFftBackend`].
#[derive(Clone)]
pub struct RustFftPlan<F> {
    forward: Arc<dyn Fft<F>>,
    inverse: Arc<dyn Fft<F>>,
    scale: F,
}

impl<F: FftNum> RustFftPlan<F> {
    /// Planned transform length.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the plan transforms zero-length lanes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: FftNum> fmt::Debug for RustFftPlan<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustFftPlan")
            .field("len", &self.len())
            .finish()
    }
}

/// In-memory backend over `ndarray` arrays with `rustfft` plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFftBackend;

impl<F> SpectralBackend<F> for RustFftBackend
where
    F: FftNum + Float,
{
    type Plan = RustFftPlan<F>;

    fn plan(&self, len: usize) -> Result<Self::Plan, ConfigError> {
        if len == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sample_count",
                reason: "transform length must be > 0",
            });
        }
        let scale = F::from_usize(len)
            .map(|n| F::one() / n)
            .ok_or(ConfigError::InvalidArgument {
                arg: "sample_count",
                reason: "transform length is not representable in the working precision",
            })?;
        let mut planner = FftPlanner::<F>::new();
        Ok(RustFftPlan {
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
            scale,
        })
    }

    fn forward(&self, plan: &Self::Plan, data: &mut ArrayD<Complex<F>>) {
        process_lanes(plan.forward.as_ref(), data);
    }

    fn inverse(&self, plan: &Self::Plan, data: &mut ArrayD<Complex<F>>) {
        process_lanes(plan.inverse.as_ref(), data);
        let scale = plan.scale;
        data.mapv_inplace(|c| c.scale(scale));
    }

    fn apply_mask(
        &self,
        spectrum: &ArrayD<Complex<F>>,
        mask: ArrayView1<'_, F>,
    ) -> ArrayD<Complex<F>> {
        let mut band = spectrum.clone();
        band.zip_mut_with(&mask, |c, &m| *c = c.scale(m));
        band
    }

    fn magnitude(&self, data: &ArrayD<Complex<F>>) -> ArrayD<F> {
        data.mapv(|c| c.norm())
    }

    fn mean_axis(&self, data: ArrayViewD<'_, F>, axis: Axis) -> Option<ArrayD<F>> {
        data.mean_axis(axis)
    }
}

/// Run `fft` over every lane of the last axis.
///
/// Standard-layout arrays are handed to `rustfft` as one contiguous buffer, which it splits into
/// consecutive transforms. Other layouts go lane by lane through a staging buffer.
fn process_lanes<F: FftNum>(fft: &dyn Fft<F>, data: &mut ArrayD<Complex<F>>) {
    let len = fft.len();
    if data.ndim() == 0 || data.is_empty() || len == 0 {
        return;
    }
    let zero = Complex::new(F::zero(), F::zero());
    let mut scratch = vec![zero; fft.get_inplace_scratch_len()];

    if let Some(buffer) = data.as_slice_mut() {
        fft.process_with_scratch(buffer, &mut scratch);
        return;
    }

    let axis = Axis(data.ndim() - 1);
    let mut staging = vec![zero; len];
    for mut lane in data.lanes_mut(axis) {
        for (dst, src) in staging.iter_mut().zip(lane.iter()) {
            *dst = *src;
        }
        fft.process_with_scratch(&mut staging, &mut scratch);
        lane.assign(&ArrayView1::from(&staging[..]));
    }
}
