//! Carousel slide painter.
//!
//! Fills the square canvas with a template background (flat + border for
//! minimal, diagonal two-stop gradient otherwise), word-wraps the chunk text
//! against measured pixel widths, vertically centers the block, and overlays
//! an "index / total" pagination label near the bottom.

use crate::error::Result;
use crate::highlight::Rgba;
use crate::rendering::{font, Canvas, RasterImage, CANVAS_SIZE};
use crate::{FontSize, StyleConfig, Template};

const SIDE_MARGIN: u32 = 60;
const PAGINATION_PX: u32 = 24;

const MINIMAL_BG: Rgba = (0xff, 0xff, 0xff, 0xff);
const MINIMAL_BORDER: Rgba = (0xe0, 0xe0, 0xe0, 0xff);
const MINIMAL_TEXT: Rgba = (0x33, 0x33, 0x33, 0xff);
const MINIMAL_PAGINATION: Rgba = (0x66, 0x66, 0x66, 0xff);
const GRADIENT_TEXT: Rgba = (0xff, 0xff, 0xff, 0xff);
const GRADIENT_PAGINATION: Rgba = (0xff, 0xff, 0xff, 0xb2);

const PROFESSIONAL: (Rgba, Rgba) = ((0x19, 0x76, 0xd2, 0xff), (0x15, 0x65, 0xc0, 0xff));
const CREATIVE: (Rgba, Rgba) = ((0x9c, 0x27, 0xb0, 0xff), (0xe9, 0x1e, 0x63, 0xff));

/// Greedy word wrap against a pixel budget.
///
/// A single word wider than the budget gets a line of its own rather than
/// being broken mid-word.
fn wrap_words(content: &str, scale: u32, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in content.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font::text_width(&candidate, scale) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render one slide.
///
/// `index` is the 1-based display position and `total` the slide count; both
/// feed the pagination label only. Pure function of its arguments.
pub fn render_slide(
    content: &str,
    style: &StyleConfig,
    index: usize,
    total: usize,
) -> Result<RasterImage> {
    let size = CANVAS_SIZE as f32;
    let mut canvas = Canvas::new(CANVAS_SIZE, CANVAS_SIZE)?;

    let text_color = match style.template {
        Template::Minimal => {
            canvas.fill(MINIMAL_BG);
            canvas.stroke_rect(2.0, 2.0, size - 4.0, size - 4.0, 4.0, MINIMAL_BORDER);
            MINIMAL_TEXT
        }
        Template::Professional | Template::Creative => {
            let (from, to) = match style.template {
                Template::Professional => PROFESSIONAL,
                _ => CREATIVE,
            };
            canvas.fill_rect_gradient(0.0, 0.0, size, size, (0.0, 0.0), (size, size), from, to);
            GRADIENT_TEXT
        }
    };

    let font_px = style.font_size.px();
    let scale = font::scale_for_px(font_px);
    let line_height = (font_px * 14 / 10) as i32;
    let max_width = CANVAS_SIZE - 2 * SIDE_MARGIN;

    let lines = wrap_words(content, scale, max_width);
    let total_height = lines.len() as i32 * line_height;
    let start_y = (CANVAS_SIZE as i32 - total_height) / 2;
    let center = (CANVAS_SIZE / 2) as i32;

    for (i, line) in lines.iter().enumerate() {
        canvas.draw_text_centered(line, center, start_y + i as i32 * line_height, scale, text_color);
    }

    let pagination_color = match style.template {
        Template::Minimal => MINIMAL_PAGINATION,
        _ => GRADIENT_PAGINATION,
    };
    let label = format!("{index} / {total}");
    canvas.draw_text_centered(
        &label,
        center,
        (CANVAS_SIZE - 40 - PAGINATION_PX / 2) as i32,
        font::scale_for_px(PAGINATION_PX),
        pagination_color,
    );

    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(template: Template, font_size: FontSize) -> StyleConfig {
        StyleConfig {
            template,
            font_size,
        }
    }

    #[test]
    fn renders_fixed_dimensions_for_all_templates() {
        for template in [Template::Professional, Template::Creative, Template::Minimal] {
            let image = render_slide("Hello slide", &style(template, FontSize::Medium), 1, 1).unwrap();
            assert_eq!(image.width, CANVAS_SIZE);
            assert_eq!(image.height, CANVAS_SIZE);
        }
    }

    #[test]
    fn slide_render_is_deterministic() {
        let s = style(Template::Professional, FontSize::Large);
        let a = render_slide("Deterministic output required", &s, 2, 5).unwrap();
        let b = render_slide("Deterministic output required", &s, 2, 5).unwrap();
        assert_eq!(a.png_data, b.png_data);
    }

    #[test]
    fn pagination_changes_the_image() {
        let s = style(Template::Minimal, FontSize::Small);
        let a = render_slide("Same content", &s, 1, 3).unwrap();
        let b = render_slide("Same content", &s, 2, 3).unwrap();
        assert_ne!(a.png_data, b.png_data);
    }

    #[test]
    fn style_changes_the_image() {
        let a = render_slide("Same content", &style(Template::Professional, FontSize::Medium), 1, 1).unwrap();
        let b = render_slide("Same content", &style(Template::Creative, FontSize::Medium), 1, 1).unwrap();
        assert_ne!(a.png_data, b.png_data);
    }

    #[test]
    fn wrap_respects_pixel_budget() {
        // scale 5 => 40px per char; budget 400px => 10 chars per line.
        let lines = wrap_words("aaaa bbbb cccc", 5, 400);
        assert_eq!(lines, vec!["aaaa bbbb".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn wrap_keeps_oversized_word_whole() {
        let lines = wrap_words("tiny enormouscompoundword tiny", 5, 400);
        assert!(lines.contains(&"enormouscompoundword".to_string()));
    }

    #[test]
    fn long_content_renders_without_error() {
        let content = "word ".repeat(400);
        render_slide(&content, &style(Template::Creative, FontSize::Large), 1, 1).unwrap();
    }
}
