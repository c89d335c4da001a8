//! Spectral frame pipeline
//!
//! Raw samples are cut into frame windows, transformed with an in-place
//! radix-2 FFT and folded into frequency buckets. The extrema tracker then
//! supplies per-frame normalisation bounds for the renderers.

mod extrema;
mod fft;
mod framer;
mod mapper;
mod spectrum;

pub use extrema::{all_local_extrema, find_extrema, local_extrema, window_bounds};
pub use fft::{fft_in_place, nearest_power_of_two};
pub use framer::SampleFramer;
pub use mapper::{bin_frequency, map_to_buckets, BinAssignments, BUCKET_TOLERANCE};
pub use spectrum::{analyze_frame, analyze_samples};
