use approx::assert_abs_diff_eq;
use compound_rs::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use compound_rs::signal::backend::{RustFftBackend, SpectralBackend};
use compound_rs::signal::compound::{
    build_masks, Band, FrequencyCompound, FrequencyCompoundConfig, StreamMetadata,
};
use compound_rs::signal::traits::SpectralOperation;
use ndarray::{array, Array3, ArrayD, ArrayView1, ArrayViewD, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::num_complex::Complex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn transform(config: &str, metadata: &str) -> FrequencyCompound {
    let config: FrequencyCompoundConfig = serde_json::from_str(config).expect("config json");
    let metadata: StreamMetadata = serde_json::from_str(metadata).expect("metadata json");
    let mut op: FrequencyCompound = FrequencyCompound::try_new(config).expect("valid config");
    let returned = op.configure(metadata.clone()).expect("valid metadata");
    assert_eq!(returned, metadata);
    op
}

#[test]
fn four_sample_scenario() {
    init_tracing();
    let x = array![1.0, 0.0, -1.0, 0.0];

    // The Nyquist bin of an even-length axis is -fs/2, so (0, 2) keeps bins 0 and 1 only.
    let half = transform(
        r#"{"bands": [[0.0, 2.0]]}"#,
        r#"{"input_shape": [4], "sampling_frequency": 4.0}"#,
    );
    assert_eq!(
        half.masks().expect("configured").mask(0).expect("mask").to_vec(),
        vec![1.0, 1.0, 0.0, 0.0]
    );
    let y = half.process(&x).expect("process");
    for v in y.iter() {
        assert_abs_diff_eq!(*v, 0.5, epsilon = 1e-12);
    }

    let full = transform(
        r#"{"bands": [[-2.0, 2.0]]}"#,
        r#"{"input_shape": [4], "sampling_frequency": 4.0}"#,
    );
    let y = full.process(&x).expect("process");
    for (got, want) in y.iter().zip([1.0, 0.0, 1.0, 0.0].iter()) {
        assert_abs_diff_eq!(got, want, epsilon = 1e-12);
    }
}

#[test]
fn shape_mismatch_scenario() {
    let op = transform(
        r#"{"bands": [{"low": 0.0, "high": 2.0}]}"#,
        r#"{"input_shape": [4], "sampling_frequency": 4.0}"#,
    );
    let err = op
        .process(&array![[1.0, 2.0, 3.0, 4.0, 5.0]])
        .expect_err("five samples against four");
    assert_eq!(
        err,
        ExecInvariantViolation::ShapeMismatch {
            arg: "data",
            expected: 4,
            got: 5,
        }
    );
}

#[test]
fn symmetric_band_pass_of_a_tone_is_its_envelope() {
    init_tracing();
    let fs = 64.0;
    let n = 256;
    let f0 = 8.0;
    let x = Array3::from_shape_fn((2, 3, n), |(frame, line, t)| {
        let amplitude = 1.0 + frame as f64 + 0.5 * line as f64;
        amplitude * (2.0 * std::f64::consts::PI * f0 * t as f64 / fs).cos()
    });
    let op = transform(
        r#"{"bands": [[4.0, 12.0], [-12.0, -4.0]]}"#,
        r#"{"input_shape": [2, 3, 256], "sampling_frequency": 64.0}"#,
    );
    let y = op.process(&x).expect("process");
    // Each half-band keeps one complex exponential of magnitude amplitude / 2.
    for ((frame, line, _), v) in y.indexed_iter() {
        let amplitude = 1.0 + frame as f64 + 0.5 * line as f64;
        assert_abs_diff_eq!(*v, amplitude / 2.0, epsilon = 1e-9);
    }
}

#[test]
fn compounding_reduces_speckle_contrast() {
    let fs = 40.0;
    let n = 512;
    let mut rng = StdRng::seed_from_u64(7);
    let x = ArrayD::from_shape_fn(vec![16, n], |_| {
        Complex::<f64>::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    });

    let contrast = |edges: &[(f64, f64)]| {
        let mut op: FrequencyCompound =
            FrequencyCompound::try_new(FrequencyCompoundConfig::from_edges(edges.iter().copied()))
                .expect("config");
        op.configure(StreamMetadata::new([16, n], fs))
            .expect("configure");
        let y = op.process(&x).expect("process");
        let mean = y.mean().expect("non-empty");
        let std = y.std(0.0);
        std / mean
    };

    let single = contrast(&[(-20.0, 20.0)]);
    let compounded = contrast(&[
        (-20.0, -10.0),
        (-10.0, 0.0),
        (0.0, 10.0),
        (10.0, 20.0),
    ]);
    assert!(
        compounded < single,
        "compounded contrast {compounded} should be below single-band contrast {single}"
    );
}

#[test]
fn config_errors_surface_at_the_right_phase() {
    let config: FrequencyCompoundConfig =
        serde_json::from_str(r#"{"bands": []}"#).expect("parses");
    let err = <FrequencyCompound as KernelLifecycle>::try_new(config).expect_err("no bands");
    assert_eq!(err, ConfigError::EmptyInput { arg: "bands" });

    assert!(matches!(
        build_masks::<f64>(-4.0, 4, &[Band::new(0.0, 1.0)]),
        Err(ConfigError::InvalidArgument { .. })
    ));
}

/// Backend wrapper counting inverse transforms, to check one reconstruction per band.
#[derive(Default)]
struct CountingBackend {
    inner: RustFftBackend,
    inverses: AtomicUsize,
}

impl SpectralBackend<f64> for CountingBackend {
    type Plan = <RustFftBackend as SpectralBackend<f64>>::Plan;

    fn plan(&self, len: usize) -> Result<Self::Plan, ConfigError> {
        self.inner.plan(len)
    }

    fn forward(&self, plan: &Self::Plan, data: &mut ArrayD<Complex<f64>>) {
        self.inner.forward(plan, data)
    }

    fn inverse(&self, plan: &Self::Plan, data: &mut ArrayD<Complex<f64>>) {
        self.inverses.fetch_add(1, Ordering::Relaxed);
        self.inner.inverse(plan, data)
    }

    fn apply_mask(
        &self,
        spectrum: &ArrayD<Complex<f64>>,
        mask: ArrayView1<'_, f64>,
    ) -> ArrayD<Complex<f64>> {
        self.inner.apply_mask(spectrum, mask)
    }

    fn magnitude(&self, data: &ArrayD<Complex<f64>>) -> ArrayD<f64> {
        self.inner.magnitude(data)
    }

    fn mean_axis(&self, data: ArrayViewD<'_, f64>, axis: Axis) -> Option<ArrayD<f64>> {
        self.inner.mean_axis(data, axis)
    }
}

#[test]
fn custom_backend_is_driven_once_per_band() {
    let config = FrequencyCompoundConfig::from_edges([(0.0, 1.0), (-1.0, 0.0), (-2.0, 2.0)]);
    let mut op: FrequencyCompound<f64, CountingBackend> =
        FrequencyCompound::try_new(config).expect("config");
    op.configure(StreamMetadata::new([2, 8], 8.0))
        .expect("configure");
    let x = ndarray::Array2::<f64>::ones((2, 8));
    op.process(&x).expect("process");
    op.process(&x).expect("process");
    assert_eq!(op.backend().inverses.load(Ordering::Relaxed), 6);
}
