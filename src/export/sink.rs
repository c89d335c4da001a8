//! Destinations for rendered frames

use anyhow::{Context, Result};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives rendered frames in increasing frame order
pub trait FrameSink {
    fn write_frame(&mut self, index: usize, image: &RgbImage) -> Result<()>;

    /// Called once after the last frame
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSink {
    /// Create the output directory if needed
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create frame directory: {:?}", dir))?;
        log::info!("Writing frames to {:?}", dir);
        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", index))
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn write_frame(&mut self, index: usize, image: &RgbImage) -> Result<()> {
        let path = self.frame_path(index);
        image
            .save(&path)
            .with_context(|| format!("Failed to write frame: {:?}", path))?;
        self.written += 1;
        log::trace!("Wrote {:?}", path);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!("Wrote {} frame(s) to {:?}", self.written, self.dir);
        Ok(())
    }
}

/// Keeps frames in memory
#[derive(Default)]
pub struct MemorySink {
    pub frames: Vec<RgbImage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, index: usize, image: &RgbImage) -> Result<()> {
        anyhow::ensure!(
            index == self.frames.len(),
            "frame {} delivered out of order (expected {})",
            index,
            self.frames.len()
        );
        self.frames.push(image.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_png_sequence_names() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = PngSequenceSink::new(temp_dir.path().join("frames")).unwrap();

        sink.write_frame(0, &RgbImage::new(4, 4)).unwrap();
        sink.write_frame(1, &RgbImage::new(4, 4)).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.written(), 2);
        assert!(temp_dir.path().join("frames/frame_000000.png").exists());
        assert!(temp_dir.path().join("frames/frame_000001.png").exists());
    }

    #[test]
    fn test_memory_sink_rejects_out_of_order() {
        let mut sink = MemorySink::new();
        sink.write_frame(0, &RgbImage::new(1, 1)).unwrap();
        assert!(sink.write_frame(2, &RgbImage::new(1, 1)).is_err());
    }
}
