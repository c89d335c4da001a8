//! Renderer trait definition

use super::properties::{PropertySpec, Properties};
use crate::error::VisualiserError;
use crate::model::{BucketedFrame, Extrema};
use image::RgbImage;

/// Draws one image per bucketed frame
///
/// Renderers may keep history between calls (trails, perspective stacks), so the
/// pipeline always calls [`FrameRenderer::render`] once per frame in increasing
/// frame order.
pub trait FrameRenderer: Send {
    /// Registry name of this renderer
    fn name(&self) -> &'static str;

    /// Every property this renderer understands, with docs and defaults
    fn options(&self) -> &'static [PropertySpec];

    /// Effective properties (defaults merged with overrides)
    fn properties(&self) -> &Properties;

    /// Replace the current settings with defaults overlaid by `overrides`
    fn set_properties(&mut self, overrides: &Properties) -> Result<(), VisualiserError>;

    /// Draw `frame`, normalising magnitudes against `extrema`
    fn render(&mut self, frame: &BucketedFrame, extrema: Extrema) -> RgbImage;
}
