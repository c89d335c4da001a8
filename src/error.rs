//! Error type for the spectral core and renderer configuration

use thiserror::Error;

/// Errors raised before or during the spectral pass
///
/// Everything here is a fail-fast condition: the pipeline reports it before
/// the first frame is produced and never returns partial output.
#[derive(Debug, Error)]
pub enum VisualiserError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("FFT length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("sample buffer is empty")]
    EmptySamples,

    #[error("unsupported renderer '{name}' (known: {})", .known.join(", "))]
    UnsupportedRenderer { name: String, known: Vec<String> },

    #[error("invalid value '{value}' for property {key}")]
    InvalidProperty { key: String, value: String },
}
