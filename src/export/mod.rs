//! Run orchestration and frame output

pub mod config;
pub mod pipeline;
mod progress;
pub mod sink;

pub use config::{BucketSpec, VisualiserConfig};
pub use pipeline::{FramePipeline, SpectralAnalysis};
pub use sink::{FrameSink, MemorySink, PngSequenceSink};
