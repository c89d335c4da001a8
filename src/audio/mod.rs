//! Audio source layer
//!
//! The spectral core only needs a mono run of integer PCM samples and the
//! rate they were captured at. [`AudioSource`] hides where they come from:
//! a decoded file for the CLI, an in-memory [`AudioClip`] in tests.

mod decoder;

pub use decoder::AudioFile;

use anyhow::Result;

/// Anything that can hand the pipeline a decoded mono clip
pub trait AudioSource {
    /// Decode the whole source; any failure is fatal to the run
    fn load(&self) -> Result<AudioClip>;
}

/// Decoded single-channel PCM audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Samples per second (Hz)
    pub sample_rate: u32,

    /// Bytes per sample in the source encoding
    pub sample_size: usize,

    /// Signed samples at the source bit depth
    pub samples: Vec<i32>,
}

impl AudioClip {
    /// Wrap already-decoded 16-bit samples
    pub fn from_samples(sample_rate: u32, samples: Vec<i32>) -> Self {
        Self {
            sample_rate,
            sample_size: 2,
            samples,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

impl AudioSource for AudioClip {
    fn load(&self) -> Result<AudioClip> {
        Ok(self.clone())
    }
}
