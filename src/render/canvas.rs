//! Clipped raster drawing on an `image::RgbImage` via `imageproc`

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, BresenhamLineIter};
use imageproc::rect::Rect;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

/// Linearly map `x` from `[min_in, max_in]` onto `[min_out, max_out]`, clamping outside the input range
///
/// A flat input range (`max_in <= min_in`) maps everything to `min_out`.
pub fn scale_value_to_range(x: i64, max_in: i64, min_in: i64, max_out: i64, min_out: i64) -> i64 {
    if max_in <= min_in || x <= min_in {
        return min_out;
    }
    if x >= max_in {
        return max_out;
    }
    let ratio = (x - min_in) as f64 / (max_in - min_in) as f64;
    min_out + ((max_out - min_out) as f64 * ratio) as i64
}

/// Black canvas with clipped drawing primitives; coordinates may fall outside the image
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BLACK),
        }
    }

    pub fn width(&self) -> i64 {
        self.image.width() as i64
    }

    pub fn height(&self) -> i64 {
        self.image.height() as i64
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Fill `[x, x + w) × [y, y + h)`
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width());
        let y1 = (y + h).min(self.height());
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// Bresenham line stamped with a square brush `thickness` pixels wide
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), thickness: i64, color: Rgb<u8>) {
        let thickness = thickness.max(1);
        let offset = (thickness - 1) / 2;
        let start = (from.0 as f32, from.1 as f32);
        let end = (to.0 as f32, to.1 as f32);

        if thickness == 1 {
            draw_line_segment_mut(&mut self.image, start, end, color);
            return;
        }
        for (x, y) in BresenhamLineIter::new(start, end) {
            let (x, y) = (x as i64, y as i64);
            self.fill_rect(x - offset, y - offset, thickness, thickness, color);
        }
    }

    /// Connect consecutive points
    pub fn draw_polyline(&mut self, points: &[(i64, i64)], thickness: i64, color: Rgb<u8>) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], thickness, color);
        }
    }

    /// Fill the area between a left-to-right polyline and the row `baseline`
    pub fn fill_below(&mut self, points: &[(i64, i64)], baseline: i64, color: Rgb<u8>) {
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if x1 <= x0 {
                continue;
            }
            for x in x0..x1 {
                let y = y0 + (y1 - y0) * (x - x0) / (x1 - x0);
                self.fill_rect(x, y, 1, baseline - y, color);
            }
        }
    }
}
