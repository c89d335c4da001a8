//! Pipeline configuration

use crate::error::VisualiserError;
use crate::model::FrequencyBuckets;
use serde::{Deserialize, Serialize};

/// Default animation speed in frames per second
pub const DEFAULT_FPS: u32 = 8;
/// Default number of generated frequency buckets
pub const DEFAULT_BUCKETS: i64 = 10;
/// Default extrema window in seconds
pub const DEFAULT_WINDOW_SECS: u32 = 10;

/// How the frequency buckets are chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketSpec {
    /// Generate this many thresholds on the exponential curve
    Count(i64),
    /// Use these ascending thresholds (Hz) as-is
    Explicit(Vec<u32>),
}

/// Configuration for one visualisation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualiserConfig {
    /// Output frames per second
    pub fps: u32,

    /// Bucket count or explicit thresholds
    pub buckets: BucketSpec,

    /// Width of the extrema window, in frames
    pub extrema_window: usize,
}

impl VisualiserConfig {
    /// 8 fps, 10 generated buckets, 10 second extrema window
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            buckets: BucketSpec::Count(DEFAULT_BUCKETS),
            extrema_window: (DEFAULT_WINDOW_SECS * DEFAULT_FPS) as usize,
        }
    }

    /// Set the frame rate (the extrema window is left in frames)
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_bucket_count(mut self, count: i64) -> Self {
        self.buckets = BucketSpec::Count(count);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Vec<u32>) -> Self {
        self.buckets = BucketSpec::Explicit(thresholds);
        self
    }

    /// Extrema window given directly in frames
    pub fn with_extrema_window(mut self, frames: usize) -> Self {
        self.extrema_window = frames;
        self
    }

    /// Extrema window given in seconds at the current frame rate
    pub fn with_extrema_window_secs(mut self, secs: u32) -> Self {
        self.extrema_window = secs as usize * self.fps as usize;
        self
    }

    /// Resolve the bucket thresholds
    pub fn frequency_buckets(&self) -> Result<FrequencyBuckets, VisualiserError> {
        match &self.buckets {
            BucketSpec::Count(n) => FrequencyBuckets::generate(*n),
            BucketSpec::Explicit(thresholds) => FrequencyBuckets::from_thresholds(thresholds.clone()),
        }
    }

    /// Check everything that can be checked before audio is decoded
    pub fn validate(&self) -> Result<(), VisualiserError> {
        if self.fps == 0 {
            return Err(VisualiserError::InvalidConfig(
                "frame rate must be positive".to_string(),
            ));
        }
        self.frequency_buckets().map(|_| ())
    }
}

impl Default for VisualiserConfig {
    fn default() -> Self {
        Self::new()
    }
}
