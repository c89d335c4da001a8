//! Polyline renderer with fading trails of previous frames

use super::canvas::{scale_value_to_range, Canvas};
use super::properties::{PropertySpec, Properties};
use super::traits::FrameRenderer;
use crate::error::VisualiserError;
use crate::model::{BucketedFrame, Extrema};
use image::{Rgb, RgbImage};
use std::collections::VecDeque;

const IMG_HEIGHT: &str = "IMG_HEIGHT";
const IMG_WIDTH: &str = "IMG_WIDTH";
const SHADOW_COUNT: &str = "SHADOW_COUNT";
const STROKE_SIZE: &str = "STROKE_SIZE";
const STROKE_COLOR_RGB: &str = "STROKE_COLOR_RGB";

/// One colour level per shadow step at most
const MAX_SHADOW_COUNT: usize = 255;

const OPTIONS: &[PropertySpec] = &[
    PropertySpec {
        key: SHADOW_COUNT,
        doc: "Number of shadow draws that remains after the main line",
        default: "3",
    },
    PropertySpec {
        key: STROKE_SIZE,
        doc: "Thickness of the drawn line in pixels",
        default: "3",
    },
    PropertySpec {
        key: STROKE_COLOR_RGB,
        doc: "Color of the line in format 'r,g,b'. Shadow lines will be darker shades of this color",
        default: "255,255,255",
    },
    PropertySpec {
        key: IMG_HEIGHT,
        doc: "Image height in pixels",
        default: "720",
    },
    PropertySpec {
        key: IMG_WIDTH,
        doc: "Image width in pixels",
        default: "1280",
    },
];

/// Joins bucket magnitudes into a line; the last few frames linger as darker shadows
pub struct LineRenderer {
    properties: Properties,
    img_width: u32,
    img_height: u32,
    shadow_count: usize,
    stroke_size: i64,
    stroke_color: Rgb<u8>,
    history: VecDeque<BucketedFrame>,
}

impl LineRenderer {
    /// Renderer with the built-in defaults
    pub fn new() -> Result<Self, VisualiserError> {
        Self::with_properties(&Properties::new())
    }

    pub fn with_properties(overrides: &Properties) -> Result<Self, VisualiserError> {
        let mut renderer = Self {
            properties: Properties::new(),
            img_width: 0,
            img_height: 0,
            shadow_count: 0,
            stroke_size: 1,
            stroke_color: Rgb([255, 255, 255]),
            history: VecDeque::new(),
        };
        renderer.set_properties(overrides)?;
        Ok(renderer)
    }

    /// Colour step between successive shadows, oldest first
    fn color_step(&self) -> [u8; 3] {
        let divider = (self.shadow_count + 1) as u32;
        self.stroke_color.0.map(|c| (c as u32 / divider) as u8)
    }
}

impl FrameRenderer for LineRenderer {
    fn name(&self) -> &'static str {
        "line"
    }

    fn options(&self) -> &'static [PropertySpec] {
        OPTIONS
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn set_properties(&mut self, overrides: &Properties) -> Result<(), VisualiserError> {
        let props = Properties::with_defaults(OPTIONS, overrides);

        self.img_height = props.parse_value(IMG_HEIGHT)?;
        self.img_width = props.parse_value(IMG_WIDTH)?;
        self.shadow_count = props.parse_in_range(SHADOW_COUNT, 0..=MAX_SHADOW_COUNT)?;
        self.stroke_size = props.parse_value(STROKE_SIZE)?;
        self.stroke_color = props.parse_rgb(STROKE_COLOR_RGB)?;
        self.properties = props;

        while self.history.len() > self.shadow_count + 1 {
            self.history.pop_front();
        }
        Ok(())
    }

    fn render(&mut self, frame: &BucketedFrame, extrema: Extrema) -> RgbImage {
        self.history.push_back(frame.clone());
        if self.history.len() > self.shadow_count + 1 {
            self.history.pop_front();
        }

        let mut canvas = Canvas::new(self.img_width, self.img_height);
        let (width, height) = (canvas.width(), canvas.height());
        let step = self.color_step();
        let mut color = [0u8; 3];

        for data in &self.history {
            for (c, s) in color.iter_mut().zip(step) {
                *c = c.saturating_add(s);
            }

            let spacing = width / (data.len() as i64 + 1);
            let mut points = Vec::with_capacity(data.len() + 2);
            points.push((0, height));
            points.extend(data.iter().enumerate().map(|(i, &magnitude)| {
                let level = scale_value_to_range(
                    magnitude as i64,
                    extrema.max as i64,
                    extrema.min as i64,
                    height,
                    0,
                );
                (spacing * (i as i64 + 1), height - level)
            }));
            points.push((width, height));

            canvas.draw_polyline(&points, self.stroke_size, Rgb(color));
        }

        canvas.into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LineRenderer {
        let props = Properties::parse("IMG_WIDTH=40\nIMG_HEIGHT=40\nSTROKE_SIZE=1\nSHADOW_COUNT=1");
        LineRenderer::with_properties(&props).unwrap()
    }

    #[test]
    fn test_latest_line_is_brightest() {
        let mut renderer = small();
        renderer.render(&BucketedFrame::from(vec![10]), Extrema::new(0, 10));
        let img = renderer.render(&BucketedFrame::from(vec![5]), Extrema::new(0, 10));

        // one bucket at x = 20; shadow peaks at the top, current frame half way
        assert_eq!(*img.get_pixel(20, 0), Rgb([127, 127, 127]));
        assert_eq!(*img.get_pixel(20, 20), Rgb([254, 254, 254]));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut renderer = small();
        for _ in 0..5 {
            renderer.render(&BucketedFrame::zeroed(4), Extrema::new(0, 0));
        }
        assert_eq!(renderer.history.len(), 2);
    }

    #[test]
    fn test_bad_colour() {
        let props = Properties::parse("STROKE_COLOR_RGB=255,255");
        assert!(LineRenderer::with_properties(&props).is_err());
    }

    #[test]
    fn test_rejects_huge_shadow_count() {
        let props = Properties::parse("SHADOW_COUNT=4294967295");
        assert!(matches!(
            LineRenderer::with_properties(&props),
            Err(VisualiserError::InvalidProperty { .. })
        ));

        let props = Properties::parse("SHADOW_COUNT=254\nIMG_WIDTH=8\nIMG_HEIGHT=8");
        let mut renderer = LineRenderer::with_properties(&props).unwrap();
        renderer.render(&BucketedFrame::from(vec![1]), Extrema::new(0, 1));
        assert_eq!(renderer.color_step(), [1, 1, 1]);

        let props = Properties::parse("SHADOW_COUNT=255");
        assert_eq!(LineRenderer::with_properties(&props).unwrap().color_step(), [0, 0, 0]);
    }

    #[test]
    fn test_defaults() {
        let renderer = LineRenderer::new().unwrap();
        assert_eq!(renderer.shadow_count, 3);
        assert_eq!(renderer.stroke_color, Rgb([255, 255, 255]));
        assert_eq!(renderer.color_step(), [63, 63, 63]);
    }
}
