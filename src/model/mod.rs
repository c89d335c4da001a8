//! Value types shared by the analysis, rendering and export layers
//!
//! Nothing in here performs I/O; these are the plain data structures
//! that flow from the FFT pass to the renderers.

mod buckets;
mod complex;
mod frame;

pub use buckets::FrequencyBuckets;
pub use complex::Complex;
pub use frame::{BucketedFrame, Extrema};
