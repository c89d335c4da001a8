//! Slices a sample buffer into fixed-length FFT windows aligned to the frame rate

use super::fft::nearest_power_of_two;
use crate::error::VisualiserError;
use crate::model::Complex;

/// Frame layout over a borrowed mono sample buffer
///
/// Frame `i` starts at `i * hop` where `hop = sample_rate / fps`, and spans
/// `window_len` samples (a power of two no greater than `hop`). Windows that run
/// past the end of the buffer are zero-padded.
#[derive(Debug, Clone, Copy)]
pub struct SampleFramer<'a> {
    samples: &'a [i32],
    hop: usize,
    window_len: usize,
    frame_count: usize,
}

impl<'a> SampleFramer<'a> {
    pub fn new(samples: &'a [i32], sample_rate: u32, fps: u32) -> Result<Self, VisualiserError> {
        if samples.is_empty() {
            return Err(VisualiserError::EmptySamples);
        }
        if fps == 0 {
            return Err(VisualiserError::InvalidConfig(
                "frame rate must be positive".to_string(),
            ));
        }

        let hop = (sample_rate / fps) as usize;
        let window_len = nearest_power_of_two(hop);
        if window_len == 0 {
            return Err(VisualiserError::InvalidConfig(format!(
                "sample rate {} Hz is too low for {} fps",
                sample_rate, fps
            )));
        }

        let frame_count = samples.len().div_ceil(hop);

        Ok(Self {
            samples,
            hop,
            window_len,
            frame_count,
        })
    }

    /// Samples between the starts of consecutive frames
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// FFT length used for every frame
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Copy frame `index` into `buffer` as real-valued complex samples
    ///
    /// # Panics
    /// If `index` is not a valid frame or `buffer` is not `window_len` long; both
    /// indicate a framing defect in the caller.
    pub fn fill_window(&self, index: usize, buffer: &mut [Complex]) {
        assert!(
            index < self.frame_count,
            "frame index {} out of range (frame count {})",
            index,
            self.frame_count
        );
        assert_eq!(buffer.len(), self.window_len, "FFT buffer has wrong length");

        let start = index * self.hop;
        let end = (start + self.window_len).min(self.samples.len());
        let available = &self.samples[start..end];

        for (slot, &sample) in buffer.iter_mut().zip(available) {
            *slot = Complex::from(sample);
        }
        buffer[available.len()..].fill(Complex::ZERO);
    }

    /// Frame `index` as a freshly allocated FFT input
    pub fn window(&self, index: usize) -> Vec<Complex> {
        let mut buffer = vec![Complex::ZERO; self.window_len];
        self.fill_window(index, &mut buffer);
        buffer
    }
}
