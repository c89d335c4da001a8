//! File decoding via symphonia

use super::{AudioClip, AudioSource};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Bit depth assumed for codecs that don't report one (lossy formats)
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// Audio file on disk; only the first channel is used
#[derive(Debug, Clone)]
pub struct AudioFile {
    path: PathBuf,
}

impl AudioFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioSource for AudioFile {
    fn load(&self) -> Result<AudioClip> {
        decode_first_channel(&self.path)
    }
}

/// Decode the first channel of `path` to integer samples at the source bit depth
fn decode_first_channel(path: &Path) -> Result<AudioClip> {
    log::debug!("Decoding {:?}", path);

    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .with_context(|| format!("Failed to probe audio format: {:?}", path))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("No sample rate in audio track")?;
    let bits = track
        .codec_params
        .bits_per_sample
        .unwrap_or(DEFAULT_BITS_PER_SAMPLE)
        .clamp(8, 32);
    let expected_frames = track.codec_params.n_frames;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let mut samples: Vec<i32> = Vec::new();
    let mut decoded_frames: u64 = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read packet from {:?}", path))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .with_context(|| format!("Failed to decode packet from {:?}", path))?;

        decoded_frames += decoded.frames() as u64;
        let spec = *decoded.spec();
        let channels = spec.channels.count().max(1);

        let mut sample_buf = SampleBuffer::<i32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        // symphonia scales to full i32 range; shift back to the source depth
        samples.extend(
            sample_buf
                .samples()
                .iter()
                .step_by(channels)
                .map(|&s| s >> (32 - bits)),
        );
    }

    // a stream cut short ends in the same EOF as a complete one
    if let Some(expected) = expected_frames {
        if decoded_frames < expected {
            bail!(
                "Audio stream truncated: decoded {} of {} frames from {:?}",
                decoded_frames,
                expected,
                path
            );
        }
    }

    let clip = AudioClip {
        sample_rate,
        sample_size: (bits / 8) as usize,
        samples,
    };

    log::info!(
        "Decoded {} samples ({:.1}s) at {}Hz, {}-bit",
        clip.samples.len(),
        clip.duration_secs(),
        clip.sample_rate,
        bits
    );

    Ok(clip)
}
