use crate::error::VisualiserError;
use serde::{Deserialize, Serialize};

/// Exponent applied to the spread index when generating thresholds
pub const EXP_POW: f64 = 0.23;
/// Multiplier applied to the exponential curve (lowest threshold in Hz)
pub const BIAS: f64 = 25.0;
/// Spread index reached by the highest bucket
pub const INDEX_MAX: f32 = 29.0;

/// Ordered, non-decreasing frequency thresholds in Hz, one per bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct FrequencyBuckets(Vec<u32>);

impl FrequencyBuckets {
    /// Generate `count` thresholds on an exponential curve from 25 Hz up to ~20 kHz
    pub fn generate(count: i64) -> Result<Self, VisualiserError> {
        if count < 1 {
            return Err(VisualiserError::InvalidConfig(format!(
                "number of frequency buckets must be at least 1, got {}",
                count
            )));
        }

        let delta = if count > 1 {
            INDEX_MAX / (count - 1) as f32
        } else {
            0.0
        };

        let thresholds = (0..count)
            .map(|i| exp_threshold(i as f32 * delta))
            .collect();

        Ok(Self(thresholds))
    }

    /// Use an explicit list of thresholds
    pub fn from_thresholds(thresholds: Vec<u32>) -> Result<Self, VisualiserError> {
        if thresholds.is_empty() {
            return Err(VisualiserError::InvalidConfig(
                "bucket threshold list is empty".to_string(),
            ));
        }
        if thresholds.contains(&0) {
            return Err(VisualiserError::InvalidConfig(
                "bucket thresholds must be positive".to_string(),
            ));
        }
        if thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err(VisualiserError::InvalidConfig(format!(
                "bucket thresholds must be ascending: {:?}",
                thresholds
            )));
        }
        Ok(Self(thresholds))
    }

    pub fn thresholds(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u32>> for FrequencyBuckets {
    type Error = VisualiserError;

    fn try_from(thresholds: Vec<u32>) -> Result<Self, Self::Error> {
        Self::from_thresholds(thresholds)
    }
}

impl From<FrequencyBuckets> for Vec<u32> {
    fn from(buckets: FrequencyBuckets) -> Self {
        buckets.0
    }
}

/// `floor(exp(EXP_POW * x) * BIAS)`
fn exp_threshold(x: f32) -> u32 {
    ((EXP_POW * x as f64).exp() * BIAS) as u32
}
