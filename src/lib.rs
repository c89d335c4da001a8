//! Freq Visualiser - audio spectrum animation frames
//!
//! This library turns a mono audio waveform into a sequence of
//! frequency-bucket frames and renders each one as an image.

pub mod analysis;
pub mod audio;
pub mod error;
pub mod export;
pub mod model;
pub mod render;

pub use error::VisualiserError;
pub use export::config::VisualiserConfig;
pub use export::pipeline::FramePipeline;
