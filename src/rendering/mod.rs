//! Deterministic canvas rendering.
//!
//! Both painters (editor-chrome code frames and carousel slides) draw onto a
//! [`Canvas`], a thin wrapper over a `tiny_skia` pixmap that adds bitmap-font
//! text. Shape fills go through tiny-skia with anti-aliasing disabled and text
//! is written pixel by pixel, so identical inputs always produce byte-identical
//! PNG output.

pub mod code;
pub mod font;
pub mod slide;

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point,
    PremultipliedColorU8, Rect, SpreadMode, Stroke, Transform,
};

use crate::error::{Error, Result};
use crate::highlight::Rgba;

/// Output canvas edge length; both variants render square 1080x1080 images.
pub const CANVAS_SIZE: u32 = 1080;

/// A rendered fixed-dimension image, encoded as PNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

fn color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.0, rgba.1, rgba.2, rgba.3)
}

fn solid_paint(rgba: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgba));
    paint.anti_alias = false;
    paint
}

fn gradient_paint(from_xy: (f32, f32), to_xy: (f32, f32), from: Rgba, to: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = false;
    if let Some(shader) = LinearGradient::new(
        Point::from_xy(from_xy.0, from_xy.1),
        Point::from_xy(to_xy.0, to_xy.1),
        vec![
            GradientStop::new(0.0, color(from)),
            GradientStop::new(1.0, color(to)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    ) {
        paint.shader = shader;
    }
    paint
}

/// Fixed-size drawing surface
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocate a surface, failing explicitly when the pixmap cannot be
    /// created so callers can tell "no image yet" from "render failed".
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::Surface(format!("cannot allocate {width}x{height} pixmap")))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill(&mut self, rgba: Rgba) {
        self.pixmap.fill(color(rgba));
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rgba: Rgba) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap
                .fill_rect(rect, &solid_paint(rgba), Transform::identity(), None);
        }
    }

    /// Fill a rect with a two-stop linear gradient between the given points
    pub fn fill_rect_gradient(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        from_xy: (f32, f32),
        to_xy: (f32, f32),
        from: Rgba,
        to: Rgba,
    ) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap.fill_rect(
                rect,
                &gradient_paint(from_xy, to_xy, from, to),
                Transform::identity(),
                None,
            );
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, rgba: Rgba) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            let path = PathBuilder::from_rect(rect);
            let stroke = Stroke {
                width: line_width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &solid_paint(rgba), &stroke, Transform::identity(), None);
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, rgba: Rgba) {
        let mut pb = PathBuilder::new();
        pb.push_circle(cx, cy, r);
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &solid_paint(rgba),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Fill a triangle with a two-stop linear gradient (corner accents)
    pub fn fill_triangle_gradient(
        &mut self,
        points: [(f32, f32); 3],
        from_xy: (f32, f32),
        to_xy: (f32, f32),
        from: Rgba,
        to: Rgba,
    ) {
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        pb.line_to(points[1].0, points[1].1);
        pb.line_to(points[2].0, points[2].1);
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &gradient_paint(from_xy, to_xy, from, to),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, rgba: Rgba) {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        let (r, g, b, a) = rgba;
        if a == 0 {
            return;
        }
        let idx = (y * self.pixmap.width() + x) as usize;
        let dst = self.pixmap.pixels()[idx];
        // Source-over in premultiplied space.
        let a16 = a as u16;
        let inv = 255 - a16;
        let na = (a16 + dst.alpha() as u16 * inv / 255).min(255) as u8;
        let nr = ((r as u16 * a16 / 255) + dst.red() as u16 * inv / 255).min(na as u16) as u8;
        let ng = ((g as u16 * a16 / 255) + dst.green() as u16 * inv / 255).min(na as u16) as u8;
        let nb = ((b as u16 * a16 / 255) + dst.blue() as u16 * inv / 255).min(na as u16) as u8;
        if let Some(px) = PremultipliedColorU8::from_rgba(nr, ng, nb, na) {
            self.pixmap.pixels_mut()[idx] = px;
        }
    }

    /// Draw `text` with its top-left corner at (x, y) using the bitmap font
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: u32, rgba: Rgba) {
        let mut pen_x = x;
        let cell = (font::GLYPH_WIDTH * scale) as i32;
        for ch in text.chars() {
            let rows = font::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits >> col & 1 == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = pen_x + (col * scale + dx) as i32;
                            let py = y + (row as u32 * scale + dy) as i32;
                            if px >= 0 && py >= 0 {
                                self.blend_pixel(px as u32, py as u32, rgba);
                            }
                        }
                    }
                }
            }
            pen_x += cell;
        }
    }

    /// Draw `text` ending at x = `right`
    pub fn draw_text_right(&mut self, text: &str, right: i32, y: i32, scale: u32, rgba: Rgba) {
        let x = right - font::text_width(text, scale) as i32;
        self.draw_text(text, x, y, scale, rgba);
    }

    /// Draw `text` centered on x = `center`
    pub fn draw_text_centered(&mut self, text: &str, center: i32, y: i32, scale: u32, rgba: Rgba) {
        let x = center - (font::text_width(text, scale) / 2) as i32;
        self.draw_text(text, x, y, scale, rgba);
    }

    /// Encode the surface into a finished [`RasterImage`]
    pub fn finish(self) -> Result<RasterImage> {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let png_data = self
            .pixmap
            .encode_png()
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(RasterImage {
            width,
            height,
            png_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_produces_png_of_requested_size() {
        let mut canvas = Canvas::new(64, 32).unwrap();
        canvas.fill((255, 255, 255, 255));
        let image = canvas.finish().unwrap();
        assert_eq!(image.width, 64);
        assert_eq!(image.height, 32);
        assert_eq!(&image.png_data[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn drawing_is_deterministic() {
        let render = || {
            let mut canvas = Canvas::new(100, 100).unwrap();
            canvas.fill((30, 30, 30, 255));
            canvas.fill_rect(10.0, 10.0, 50.0, 20.0, (200, 100, 50, 255));
            canvas.fill_circle(70.0, 70.0, 12.0, (255, 95, 87, 255));
            canvas.draw_text("abc XYZ 123", 5, 50, 2, (212, 212, 212, 255));
            canvas.finish().unwrap().png_data
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn text_changes_pixels() {
        let blank = {
            let mut c = Canvas::new(64, 64).unwrap();
            c.fill((0, 0, 0, 255));
            c.finish().unwrap().png_data
        };
        let texty = {
            let mut c = Canvas::new(64, 64).unwrap();
            c.fill((0, 0, 0, 255));
            c.draw_text("Hi", 4, 4, 2, (255, 255, 255, 255));
            c.finish().unwrap().png_data
        };
        assert_ne!(blank, texty);
    }

    #[test]
    fn offscreen_text_is_clipped_not_panicking() {
        let mut c = Canvas::new(32, 32).unwrap();
        c.fill((0, 0, 0, 255));
        c.draw_text("way past the edge", -10, 28, 3, (255, 255, 255, 255));
        c.finish().unwrap();
    }
}
