//! Main visualisation pipeline orchestration

use super::config::VisualiserConfig;
use super::progress::ProgressLog;
use super::sink::FrameSink;
use crate::analysis::{all_local_extrema, analyze_samples};
use crate::audio::{AudioClip, AudioSource};
use crate::model::{BucketedFrame, Extrema, FrequencyBuckets};
use crate::render::FrameRenderer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of progress steps logged per pass
const PROGRESS_STEPS: usize = 10;

/// Output of the spectral pass: every bucketed frame of a clip, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralAnalysis {
    pub sample_rate: u32,
    pub fps: u32,
    pub thresholds: FrequencyBuckets,
    pub frames: Vec<BucketedFrame>,
}

impl SpectralAnalysis {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Save as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialise frames")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write frame dump: {:?}", path))?;
        log::info!("Frame data written to {:?}", path);
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame dump: {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Invalid frame dump: {:?}", path))
    }
}

/// Main visualisation pipeline
pub struct FramePipeline {
    config: VisualiserConfig,
    buckets: FrequencyBuckets,
}

impl FramePipeline {
    /// Validate `config` and resolve its frequency buckets
    pub fn new(config: VisualiserConfig) -> Result<Self> {
        config.validate().context("Invalid visualiser configuration")?;
        let buckets = config.frequency_buckets()?;

        log::debug!("Frequency buckets: {:?}", buckets.thresholds());

        Ok(Self { config, buckets })
    }

    pub fn config(&self) -> &VisualiserConfig {
        &self.config
    }

    pub fn buckets(&self) -> &FrequencyBuckets {
        &self.buckets
    }

    /// Run the complete process: decode, analyse, render every frame into `sink`
    pub fn run(
        &self,
        source: &dyn AudioSource,
        renderer: &mut dyn FrameRenderer,
        sink: &mut dyn FrameSink,
    ) -> Result<SpectralAnalysis> {
        log::info!("Starting visualisation at {} fps", self.config.fps);

        // Step 1: Decode audio
        let clip = source.load().context("Failed to load audio")?;

        // Step 2: FFT + bucketing for every frame
        let analysis = self.analyze(&clip)?;

        // Step 3: Extrema + rendering
        self.render(&analysis, renderer, sink)?;

        log::info!("Visualisation complete!");
        Ok(analysis)
    }

    /// Build the full ordered sequence of bucketed frames for `clip`
    pub fn analyze(&self, clip: &AudioClip) -> Result<SpectralAnalysis> {
        log::info!(
            "FFT calculation: {} samples at {}Hz, {} buckets",
            clip.samples.len(),
            clip.sample_rate,
            self.buckets.len()
        );

        let frames = analyze_samples(&clip.samples, clip.sample_rate, self.config.fps, &self.buckets)
            .context("Spectral analysis failed")?;

        log::info!("FFT calculation complete: {} frames", frames.len());

        Ok(SpectralAnalysis {
            sample_rate: clip.sample_rate,
            fps: self.config.fps,
            thresholds: self.buckets.clone(),
            frames,
        })
    }

    /// Per-frame extrema over the configured window
    pub fn extrema(&self, analysis: &SpectralAnalysis) -> Vec<Extrema> {
        all_local_extrema(&analysis.frames, self.config.extrema_window)
    }

    /// Hand each `(frame, extrema)` pair to `renderer`, in frame order, and pass
    /// the image on to `sink`
    pub fn render(
        &self,
        analysis: &SpectralAnalysis,
        renderer: &mut dyn FrameRenderer,
        sink: &mut dyn FrameSink,
    ) -> Result<()> {
        let extrema = self.extrema(analysis);
        let mut progress = ProgressLog::new("Animation generation", PROGRESS_STEPS, analysis.frame_count());

        log::debug!(
            "Rendering with '{}' (extrema window {} frames)",
            renderer.name(),
            self.config.extrema_window
        );

        for (i, (frame, &bounds)) in analysis.frames.iter().zip(&extrema).enumerate() {
            let image = renderer.render(frame, bounds);
            sink.write_frame(i, &image)
                .with_context(|| format!("Failed to output frame {}", i))?;
            progress.increment();
        }

        sink.finish()
    }
}
