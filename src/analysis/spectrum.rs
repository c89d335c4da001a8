//! Framer -> FFT -> bucket mapper over every frame of a clip

use super::fft::fft_in_place;
use super::framer::SampleFramer;
use super::mapper::map_to_buckets;
use crate::error::VisualiserError;
use crate::model::{BucketedFrame, Complex, FrequencyBuckets};
use rayon::prelude::*;

/// Bucketed frame for frame `index` of `framer`
///
/// Drops the DC term and the redundant upper half of the transform before
/// mapping, so the spectrum handed to the mapper has `window_len / 2 - 1` bins.
pub fn analyze_frame(
    framer: &SampleFramer<'_>,
    index: usize,
    buckets: &FrequencyBuckets,
    sample_rate: u32,
) -> Result<BucketedFrame, VisualiserError> {
    let mut spectrum = framer.window(index);
    fft_in_place(&mut spectrum)?;

    let half = spectrum.len() / 2;
    let magnitudes: Vec<u32> = spectrum
        .get(1..half)
        .unwrap_or_default()
        .iter()
        .map(Complex::magnitude_u32)
        .collect();

    log::trace!("frame {}: {} spectrum bins", index, magnitudes.len());
    Ok(map_to_buckets(&magnitudes, buckets, sample_rate))
}

/// Every bucketed frame of `samples`, in frame order
///
/// Frames are independent, so they are computed in parallel and collected back
/// in index order.
pub fn analyze_samples(
    samples: &[i32],
    sample_rate: u32,
    fps: u32,
    buckets: &FrequencyBuckets,
) -> Result<Vec<BucketedFrame>, VisualiserError> {
    let framer = SampleFramer::new(samples, sample_rate, fps)?;

    log::debug!(
        "Framing {} samples: hop={}, fft_len={}, frames={}",
        samples.len(),
        framer.hop(),
        framer.window_len(),
        framer.frame_count()
    );

    (0..framer.frame_count())
        .into_par_iter()
        .map(|i| analyze_frame(&framer, i, buckets, sample_rate))
        .collect()
}
