//! Perspective grid renderer: recent frames recede into the distance

use super::canvas::{scale_value_to_range, Canvas, BLACK};
use super::properties::{PropertySpec, Properties};
use super::traits::FrameRenderer;
use crate::error::VisualiserError;
use crate::model::{BucketedFrame, Extrema};
use image::{Rgb, RgbImage};
use std::collections::VecDeque;

const IMG_HEIGHT: &str = "IMG_HEIGHT";
const IMG_WIDTH: &str = "IMG_WIDTH";
const DEPTH_VALUE: &str = "DEPTH_VALUE";
const STROKE_SIZE: &str = "STROKE_SIZE";
const STROKE_COLOR_RGB: &str = "STROKE_COLOR_RGB";
const SIZE_COEFFICIENT_X: &str = "SIZE_COEFFICIENT_X";
const SIZE_COEFFICIENT_Y: &str = "SIZE_COEFFICIENT_Y";

const MAX_DEPTH: usize = 1024;

const OPTIONS: &[PropertySpec] = &[
    PropertySpec {
        key: DEPTH_VALUE,
        doc: "How deep should be the grid (how many previous data should be displayed)",
        default: "15",
    },
    PropertySpec {
        key: STROKE_SIZE,
        doc: "Thickness of the first line in pixels. Previous data will be gradually less thick up to size 1px",
        default: "3",
    },
    PropertySpec {
        key: STROKE_COLOR_RGB,
        doc: "Color of the line in format 'r,g,b'.",
        default: "255,255,255",
    },
    PropertySpec {
        key: SIZE_COEFFICIENT_X,
        doc: "How fast should width shrink in regards to perspective (0<value<=1)",
        default: "0.92",
    },
    PropertySpec {
        key: SIZE_COEFFICIENT_Y,
        doc: "How fast should height shrink in regards to perspective (0<value<=1)",
        default: "0.8",
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

/// Stack of the last `DEPTH_VALUE + 1` frames, each shrunk towards the centre
/// by its age and linked to its neighbour by grid lines
pub struct Grid3dRenderer {
    properties: Properties,
    img_width: u32,
    img_height: u32,
    depth: usize,
    stroke_size: i64,
    stroke_color: Rgb<u8>,
    shrink_x: f64,
    shrink_y: f64,
    history: VecDeque<BucketedFrame>,
}

impl Grid3dRenderer {
    /// Renderer with the built-in defaults
    pub fn new() -> Result<Self, VisualiserError> {
        Self::with_properties(&Properties::new())
    }

    pub fn with_properties(overrides: &Properties) -> Result<Self, VisualiserError> {
        let mut renderer = Self {
            properties: Properties::new(),
            img_width: 0,
            img_height: 0,
            depth: 0,
            stroke_size: 1,
            stroke_color: Rgb([255, 255, 255]),
            shrink_x: 1.0,
            shrink_y: 1.0,
            history: VecDeque::new(),
        };
        renderer.set_properties(overrides)?;
        Ok(renderer)
    }

    /// Outline of `data` drawn `age` steps into the distance, closed at both ends on its floor
    fn outline(&self, data: &BucketedFrame, extrema: Extrema, age: usize) -> (Vec<(i64, i64)>, i64) {
        let width = self.img_width as f64;
        let height = self.img_height as f64;

        let size_x = self.shrink_x.powi(age as i32) * width;
        let size_y = self.shrink_y.powi(age as i32) * height;
        let min_x = 0.5 * (width - size_x);
        let max_x = width - min_x;
        let floor = (height - 0.5 * (height - size_y)) as i64;

        let mut points = Vec::with_capacity(data.len() + 2);
        points.push((min_x as i64, floor));
        points.extend(data.iter().enumerate().map(|(i, &magnitude)| {
            let x = size_x / (data.len() + 1) as f64 * (i + 1) as f64 + min_x;
            let level = scale_value_to_range(
                magnitude as i64,
                extrema.max as i64,
                extrema.min as i64,
                size_y as i64,
                0,
            );
            (x as i64, floor - level)
        }));
        points.push((max_x as i64, floor));

        (points, floor)
    }
}

impl FrameRenderer for Grid3dRenderer {
    fn name(&self) -> &'static str {
        "grid3d"
    }

    fn options(&self) -> &'static [PropertySpec] {
        OPTIONS
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn set_properties(&mut self, overrides: &Properties) -> Result<(), VisualiserError> {
        let props = Properties::with_defaults(OPTIONS, overrides);

        let shrink_x: f64 = props.parse_value(SIZE_COEFFICIENT_X)?;
        let shrink_y: f64 = props.parse_value(SIZE_COEFFICIENT_Y)?;
        for (key, value) in [(SIZE_COEFFICIENT_X, shrink_x), (SIZE_COEFFICIENT_Y, shrink_y)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(VisualiserError::InvalidProperty {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        self.img_height = props.parse_value(IMG_HEIGHT)?;
        self.img_width = props.parse_value(IMG_WIDTH)?;
        self.depth = props.parse_in_range(DEPTH_VALUE, 0..=MAX_DEPTH)?;
        self.stroke_size = props.parse_value(STROKE_SIZE)?;
        self.stroke_color = props.parse_rgb(STROKE_COLOR_RGB)?;
        self.shrink_x = shrink_x;
        self.shrink_y = shrink_y;
        self.properties = props;

        while self.history.len() > self.depth + 1 {
            self.history.pop_front();
        }
        Ok(())
    }

    fn render(&mut self, frame: &BucketedFrame, extrema: Extrema) -> RgbImage {
        self.history.push_back(frame.clone());
        if self.history.len() > self.depth + 1 {
            self.history.pop_front();
        }

        let mut canvas = Canvas::new(self.img_width, self.img_height);
        let newest = self.history.len() - 1;
        let mut previous: Option<Vec<(i64, i64)>> = None;

        // oldest first so nearer frames occlude the ones behind them
        for (i, data) in self.history.iter().enumerate() {
            let stroke = scale_value_to_range(i as i64, newest as i64, 0, self.stroke_size, 1);
            let (points, floor) = self.outline(data, extrema, newest - i);

            if let Some(prev) = &previous {
                for (&a, &b) in points.iter().zip(prev) {
                    canvas.draw_line(a, b, stroke, self.stroke_color);
                }
            }
            canvas.fill_below(&points, floor, BLACK);
            canvas.draw_polyline(&points, stroke, self.stroke_color);

            previous = Some(points);
        }

        canvas.into_image()
    }
}
