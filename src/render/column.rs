//! Stacked-block column renderer (the default)

use super::canvas::{scale_value_to_range, Canvas, GREEN, RED, YELLOW};
use super::properties::{PropertySpec, Properties};
use super::traits::FrameRenderer;
use crate::error::VisualiserError;
use crate::model::{BucketedFrame, Extrema};
use image::{Rgb, RgbImage};

const NO_OF_BLOCKS_IN_COLUMN: &str = "NO_OF_BLOCKS_IN_COLUMN";
const COLUMN_BLOCK_PADDING: &str = "COLUMN_BLOCK_PADDING";
const COLUMN_PADDING: &str = "COLUMN_PADDING";
const IMG_HEIGHT: &str = "IMG_HEIGHT";
const IMG_WIDTH: &str = "IMG_WIDTH";

const OPTIONS: &[PropertySpec] = &[
    PropertySpec {
        key: NO_OF_BLOCKS_IN_COLUMN,
        doc: "Number of blocks in one column representing the strength of the frequency",
        default: "10",
    },
    PropertySpec {
        key: COLUMN_BLOCK_PADDING,
        doc: "Padding between column blocks given in a percentage of the whole block",
        default: "0.1",
    },
    PropertySpec {
        key: COLUMN_PADDING,
        doc: "Padding of the column to the top and bottom border of the image, given in percentage of the height of the image",
        default: "0.1",
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

/// Blocks from the top of a full column that are drawn red
const RED_SECTION: f32 = 0.2;
/// Blocks (from the top) below which the column turns green
const YELLOW_SECTION: f32 = 0.8;

/// One column of stacked blocks per bucket, coloured green/yellow/red by level
pub struct ColumnRenderer {
    properties: Properties,
    img_width: u32,
    img_height: u32,
    blocks_in_column: i64,
    max_out: i64,
    base: i64,
    block_height: i64,
    rect_height: i64,
}

impl ColumnRenderer {
    /// Renderer with the built-in defaults
    pub fn new() -> Result<Self, VisualiserError> {
        Self::with_properties(&Properties::new())
    }

    pub fn with_properties(overrides: &Properties) -> Result<Self, VisualiserError> {
        let mut renderer = Self {
            properties: Properties::new(),
            img_width: 0,
            img_height: 0,
            blocks_in_column: 0,
            max_out: 0,
            base: 0,
            block_height: 0,
            rect_height: 0,
        };
        renderer.set_properties(overrides)?;
        Ok(renderer)
    }

    fn block_color(&self, index_from_top: i64) -> Rgb<u8> {
        let level = index_from_top as f32 / self.blocks_in_column as f32;
        if level < RED_SECTION {
            RED
        } else if level < YELLOW_SECTION {
            YELLOW
        } else {
            GREEN
        }
    }
}

impl FrameRenderer for ColumnRenderer {
    fn name(&self) -> &'static str {
        "column"
    }

    fn options(&self) -> &'static [PropertySpec] {
        OPTIONS
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn set_properties(&mut self, overrides: &Properties) -> Result<(), VisualiserError> {
        let props = Properties::with_defaults(OPTIONS, overrides);

        let img_height: u32 = props.parse_value(IMG_HEIGHT)?;
        let img_width: u32 = props.parse_value(IMG_WIDTH)?;
        let blocks: u32 = props.parse_value(NO_OF_BLOCKS_IN_COLUMN)?;
        let column_padding: f32 = props.parse_value(COLUMN_PADDING)?;
        let block_padding: f32 = props.parse_value(COLUMN_BLOCK_PADDING)?;

        let max_out = (img_height as f32 * (1.0 - column_padding)) as i64;
        let block_height = if blocks > 0 { max_out / blocks as i64 } else { 0 };
        if block_height <= 0 {
            return Err(VisualiserError::InvalidProperty {
                key: NO_OF_BLOCKS_IN_COLUMN.to_string(),
                value: blocks.to_string(),
            });
        }

        self.img_height = img_height;
        self.img_width = img_width;
        self.blocks_in_column = blocks as i64;
        self.max_out = max_out;
        self.base = (img_height as f32 * column_padding / 2.0) as i64;
        self.block_height = block_height;
        self.rect_height = ((1.0 - block_padding) * block_height as f32) as i64;
        self.properties = props;
        Ok(())
    }

    fn render(&mut self, frame: &BucketedFrame, extrema: Extrema) -> RgbImage {
        let mut canvas = Canvas::new(self.img_width, self.img_height);
        let bar_width = canvas.width() / (frame.len() as i64 * 2 + 1);

        for (i, &magnitude) in frame.iter().enumerate() {
            let height = scale_value_to_range(
                magnitude as i64,
                extrema.max as i64,
                extrema.min as i64,
                self.max_out,
                0,
            );
            let blocks = ((height + self.block_height - 1) / self.block_height).min(self.blocks_in_column);

            let x = bar_width * (2 * i as i64 + 1);
            let mut y = canvas.height() - blocks * self.block_height - self.base;

            let empty = self.blocks_in_column - blocks;
            for block in 0..blocks {
                let color = self.block_color(block + empty);
                canvas.fill_rect(x, y, bar_width, self.rect_height, color);
                y += self.block_height;
            }
        }

        canvas.into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::BLACK;

    fn small() -> ColumnRenderer {
        let props = Properties::parse("IMG_WIDTH=70\nIMG_HEIGHT=100\nCOLUMN_PADDING=0\nCOLUMN_BLOCK_PADDING=0");
        ColumnRenderer::with_properties(&props).unwrap()
    }

    #[test]
    fn test_defaults() {
        let mut renderer = ColumnRenderer::new().unwrap();
        assert_eq!(renderer.properties().get(IMG_WIDTH), Some("1280"));
        let img = renderer.render(&BucketedFrame::zeroed(10), Extrema::new(0, 0));
        assert_eq!(img.dimensions(), (1280, 720));
    }

    #[test]
    fn test_silent_frame_is_black() {
        let img = small().render(&BucketedFrame::zeroed(3), Extrema::new(0, 0));
        assert!(img.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_full_column_colours() {
        // 3 buckets -> bar width 10, second bucket at x = 30..40
        let frame = BucketedFrame::from(vec![0, 50, 0]);
        let img = small().render(&frame, Extrema::new(0, 50));

        // top block red, middle yellow, bottom green
        assert_eq!(*img.get_pixel(35, 5), RED);
        assert_eq!(*img.get_pixel(35, 50), YELLOW);
        assert_eq!(*img.get_pixel(35, 95), GREEN);
        // empty neighbour column
        assert_eq!(*img.get_pixel(15, 95), BLACK);
    }

    #[test]
    fn test_half_column_starts_yellow() {
        let frame = BucketedFrame::from(vec![25]);
        let img = small().render(&frame, Extrema::new(0, 50));
        // 5 of 10 blocks lit: rows 50..100
        assert_eq!(*img.get_pixel(30, 45), BLACK);
        assert_eq!(*img.get_pixel(30, 55), YELLOW);
    }

    #[test]
    fn test_invalid_properties() {
        let props = Properties::parse("NO_OF_BLOCKS_IN_COLUMN=0");
        assert!(ColumnRenderer::with_properties(&props).is_err());
        let props = Properties::parse("IMG_WIDTH=wide");
        assert!(matches!(
            ColumnRenderer::with_properties(&props),
            Err(VisualiserError::InvalidProperty { .. })
        ));
    }
}
