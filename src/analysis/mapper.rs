//! Folds one magnitude spectrum into frequency buckets

use crate::model::{BucketedFrame, FrequencyBuckets};

/// Catchment widening applied to every bucket threshold
pub const BUCKET_TOLERANCE: f32 = 1.5;

/// Bucket index for each spectrum bin, in bin order
///
/// The bucket pointer only moves forward: bin `i` lands in the first bucket at
/// or after the previous bin's bucket whose `threshold * 1.5` covers the bin's
/// frequency. Bins past the last bucket's tolerance yield `None`.
pub struct BinAssignments<'a> {
    thresholds: &'a [u32],
    sample_rate: f32,
    spectrum_len: usize,
    bin: usize,
    bucket: usize,
}

impl<'a> BinAssignments<'a> {
    pub fn new(buckets: &'a FrequencyBuckets, sample_rate: u32, spectrum_len: usize) -> Self {
        Self {
            thresholds: buckets.thresholds(),
            sample_rate: sample_rate as f32,
            spectrum_len,
            bin: 0,
            bucket: 0,
        }
    }
}

impl Iterator for BinAssignments<'_> {
    type Item = Option<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bin >= self.spectrum_len {
            return None;
        }

        let freq = bin_frequency(self.bin, self.sample_rate, self.spectrum_len);
        self.bin += 1;

        while self.bucket < self.thresholds.len()
            && freq > self.thresholds[self.bucket] as f32 * BUCKET_TOLERANCE
        {
            self.bucket += 1;
        }

        Some((self.bucket < self.thresholds.len()).then_some(self.bucket))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.spectrum_len - self.bin;
        (remaining, Some(remaining))
    }
}

/// Centre frequency of bin `i` in a DC-stripped half spectrum of `spectrum_len` bins
///
/// `(i + 1) * sample_rate / (2 * spectrum_len)`
pub fn bin_frequency(i: usize, sample_rate: f32, spectrum_len: usize) -> f32 {
    (i + 1) as f32 * sample_rate / (spectrum_len * 2) as f32
}

/// Keep the peak magnitude of the bins falling into each bucket
///
/// `magnitudes` is the non-redundant half of the FFT with the DC term removed.
pub fn map_to_buckets(
    magnitudes: &[u32],
    buckets: &FrequencyBuckets,
    sample_rate: u32,
) -> BucketedFrame {
    let mut frame = BucketedFrame::zeroed(buckets.len());
    let peaks = frame.magnitudes_mut();

    for (&magnitude, bucket) in magnitudes
        .iter()
        .zip(BinAssignments::new(buckets, sample_rate, magnitudes.len()))
    {
        match bucket {
            Some(j) => peaks[j] = peaks[j].max(magnitude),
            // Every later bin is higher still
            None => break,
        }
    }

    frame
}
