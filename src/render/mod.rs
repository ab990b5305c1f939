pub mod colors;
pub mod cushion;
pub mod present;
pub mod scene;
pub mod text;

use std::ops::Range;

use image::RgbaImage;

use crate::layout::Rect;

/// CPU framebuffer, RGBA8, row-major, fully opaque.
#[derive(Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for pixel in pixels.chunks_exact_mut(4) {
            pixel[0] = background[0];
            pixel[1] = background[1];
            pixel[2] = background[2];
            pixel[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Pixel columns covered by `[x0, x1)`. Edges round to the nearest pixel
    /// boundary so adjacent tiles neither gap nor overlap.
    pub fn columns(&self, x0: f64, x1: f64) -> Range<usize> {
        span(x0, x1, self.width)
    }

    pub fn rows(&self, y0: f64, y1: f64) -> Range<usize> {
        span(y0, y1, self.height)
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width as usize + x) * 4;
        self.pixels[i] = rgb[0];
        self.pixels[i + 1] = rgb[1];
        self.pixels[i + 2] = rgb[2];
    }

    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, rgb: [u8; 3], alpha: u8) {
        if alpha == 0 {
            return;
        }
        let i = (y * self.width as usize + x) * 4;
        let a = alpha as u32;
        for c in 0..3 {
            let dst = self.pixels[i + c] as u32;
            self.pixels[i + c] = ((rgb[c] as u32 * a + dst * (255 - a) + 127) / 255) as u8;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, rgba: [u8; 4]) {
        let rgb = [rgba[0], rgba[1], rgba[2]];
        for y in self.rows(rect.y, rect.bottom()) {
            for x in self.columns(rect.x, rect.right()) {
                self.blend(x, y, rgb, rgba[3]);
            }
        }
    }

    /// Outline drawn inside `rect`, `thickness` pixels wide.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: f64, rgba: [u8; 4]) {
        let t = thickness.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
        if t <= 0.0 {
            return;
        }
        let inner_h = rect.height - 2.0 * t;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), rgba);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t), rgba);
        if inner_h > 0.0 {
            self.fill_rect(Rect::new(rect.x, rect.y + t, t, inner_h), rgba);
            self.fill_rect(Rect::new(rect.right() - t, rect.y + t, t, inner_h), rgba);
        }
    }

    /// Alpha-composite an image with its top-left corner at `(x, y)`, clipped.
    pub fn blit(&mut self, img: &RgbaImage, x: i64, y: i64) {
        for (ix, iy, px) in img.enumerate_pixels() {
            let (cx, cy) = (x + ix as i64, y + iy as i64);
            if cx < 0 || cy < 0 || cx >= self.width as i64 || cy >= self.height as i64 {
                continue;
            }
            self.blend(cx as usize, cy as usize, [px[0], px[1], px[2]], px[3]);
        }
    }

    /// Paint `rgb` through an 8-bit coverage mask (glyph bitmaps).
    pub fn blend_mask(&mut self, mask: &[u8], mask_w: usize, x: i64, y: i64, rgb: [u8; 3]) {
        if mask_w == 0 {
            return;
        }
        for (row, line) in mask.chunks_exact(mask_w).enumerate() {
            let cy = y + row as i64;
            if cy < 0 || cy >= self.height as i64 {
                continue;
            }
            for (col, &coverage) in line.iter().enumerate() {
                let cx = x + col as i64;
                if cx < 0 || cx >= self.width as i64 {
                    continue;
                }
                self.blend(cx as usize, cy as usize, rgb, coverage);
            }
        }
    }

    /// Pack into softbuffer's `0x00RRGGBB` layout.
    pub fn write_0rgb(&self, out: &mut [u32]) {
        for (dst, src) in out.iter_mut().zip(self.pixels.chunks_exact(4)) {
            *dst = (src[0] as u32) << 16 | (src[1] as u32) << 8 | src[2] as u32;
        }
    }
}

fn span(a: f64, b: f64, limit: u32) -> Range<usize> {
    let clamp = |v: f64| v.round().clamp(0.0, limit as f64) as usize;
    let (start, end) = (clamp(a), clamp(b));
    start..end.max(start)
}
