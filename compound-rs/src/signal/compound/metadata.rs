use crate::kernel::ConfigError;
use compound_rs_core::num_rs::fftfreq;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Constant per-stream metadata handed over by the host pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamMetadata {
    /// Shape of every batch in the stream. The last axis is the time/depth axis.
    pub input_shape: Vec<usize>,
    /// Sampling frequency of the time/depth axis.
    #[serde(default)]
    pub sampling_frequency: Option<f64>,
}

impl StreamMetadata {
    /// Metadata for batches of `input_shape` sampled at `sampling_frequency`.
    pub fn new(input_shape: impl Into<Vec<usize>>, sampling_frequency: f64) -> Self {
        Self {
            input_shape: input_shape.into(),
            sampling_frequency: Some(sampling_frequency),
        }
    }

    /// Extract and validate the sampling descriptor of the transformed axis.
    pub fn sampling_descriptor(&self) -> Result<SamplingDescriptor, ConfigError> {
        let sampling_frequency = self
            .sampling_frequency
            .ok_or(ConfigError::MissingField {
                arg: "sampling_frequency",
            })?;
        let sample_count = *self
            .input_shape
            .last()
            .ok_or(ConfigError::MissingField { arg: "input_shape" })?;
        SamplingDescriptor::try_new(sampling_frequency, sample_count)
    }
}

/// Sampling rate and length of the transformed axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingDescriptor {
    sampling_frequency: f64,
    sample_count: usize,
}

impl SamplingDescriptor {
    /// Validate and build a descriptor.
    pub fn try_new(sampling_frequency: f64, sample_count: usize) -> Result<Self, ConfigError> {
        if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sampling_frequency",
                reason: "sampling frequency must be finite and > 0",
            });
        }
        if sample_count == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sample_count",
                reason: "sample count must be > 0",
            });
        }
        Ok(Self {
            sampling_frequency,
            sample_count,
        })
    }

    /// Sampling frequency.
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Number of samples along the transformed axis.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Half the sampling frequency.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sampling_frequency
    }

    /// Signed frequency of every FFT bin, in FFT output order.
    pub fn frequencies(&self) -> Result<Array1<f64>, ConfigError> {
        Ok(fftfreq(self.sample_count, 1.0 / self.sampling_frequency)?)
    }
}
