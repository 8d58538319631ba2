use serde::{Deserialize, Serialize};

/// Closed interval of signed frequencies, in the units of the sampling frequency.
///
/// Edges are matched against the signed FFT frequency axis, so `(0, f)` only selects the
/// non-negative half of the spectrum. Use a negative `low` edge for a symmetric band-pass.
///
/// Deserializes from either `{"low": .., "high": ..}` or a `[low, high]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BandRepr")]
pub struct Band {
    /// Lower edge, inclusive.
    pub low: f64,
    /// Upper edge, inclusive.
    pub high: f64,
}

impl Band {
    /// Create a band from its edges.
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `frequency` lies within the band, both edges included.
    #[inline]
    pub fn contains(&self, frequency: f64) -> bool {
        self.low <= frequency && frequency <= self.high
    }
}

impl From<(f64, f64)> for Band {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BandRepr {
    Pair(f64, f64),
    Edges { low: f64, high: f64 },
}

impl From<BandRepr> for Band {
    fn from(value: BandRepr) -> Self {
        match value {
            BandRepr::Pair(low, high) | BandRepr::Edges { low, high } => Self::new(low, high),
        }
    }
}

/// Constructor config for [`FrequencyCompound`](super::FrequencyCompound).
///
/// `bands` is the only recognized option. It is required and must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrequencyCompoundConfig {
    /// Bands to compound, processed in order.
    pub bands: Vec<Band>,
}

impl FrequencyCompoundConfig {
    /// Build a config from any sequence of `(low, high)` pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            bands: edges.into_iter().map(Band::from).collect(),
        }
    }
}
