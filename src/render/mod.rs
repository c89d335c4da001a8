//! Frame renderers
//!
//! Each renderer turns a bucketed frame plus its local extrema into an RGB
//! image. Renderers are looked up by name through an explicit
//! [`RendererRegistry`] and tuned with [`Properties`].

mod canvas;
mod column;
mod grid3d;
mod line;
mod properties;
mod registry;
mod traits;

pub use canvas::scale_value_to_range;
pub use column::ColumnRenderer;
pub use grid3d::Grid3dRenderer;
pub use line::LineRenderer;
pub use properties::{describe, Properties, PropertySpec};
pub use registry::{RendererFactory, RendererRegistry};
pub use traits::FrameRenderer;
