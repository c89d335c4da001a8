use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One magnitude per frequency bucket for a single output frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketedFrame(Vec<u32>);

impl BucketedFrame {
    /// Zero-initialised frame with `bucket_count` magnitudes
    pub fn zeroed(bucket_count: usize) -> Self {
        Self(vec![0; bucket_count])
    }

    pub fn magnitudes(&self) -> &[u32] {
        &self.0
    }

    pub(crate) fn magnitudes_mut(&mut self) -> &mut [u32] {
        &mut self.0
    }

    /// Index of the bucket holding the highest magnitude (first one on ties)
    pub fn peak_bucket(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u32)>, (i, &m)| match best {
                Some((_, bm)) if bm >= m => best,
                _ => Some((i, m)),
            })
            .map(|(i, _)| i)
    }
}

impl From<Vec<u32>> for BucketedFrame {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}

impl Deref for BucketedFrame {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

/// Min/max magnitude across a window of frames, used to normalise drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrema {
    pub min: u32,
    pub max: u32,
}

impl Extrema {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Spread between max and min (0 when the window is flat)
    pub fn span(&self) -> u32 {
        self.max.saturating_sub(self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_bucket() {
        let frame = BucketedFrame::from(vec![1, 7, 3, 7]);
        assert_eq!(frame.peak_bucket(), Some(1));
        assert_eq!(BucketedFrame::from(vec![]).peak_bucket(), None);
    }

    #[test]
    fn test_zeroed() {
        let frame = BucketedFrame::zeroed(4);
        assert_eq!(frame.len(), 4);
        assert!(frame.iter().all(|&m| m == 0));
    }

    #[test]
    fn test_extrema_span() {
        assert_eq!(Extrema::new(3, 10).span(), 7);
        assert_eq!(Extrema::new(0, 0).span(), 0);
    }
}
