//! Editor-chrome code frame painter.
//!
//! Paints a snippet as a fake dark-theme editor window: background gradient,
//! tab bar with window-control dots, line-number gutter, highlighted source
//! lines, decorative border and accent, and a status bar with line/character
//! counts. Lines that would land below the vertical bound are skipped; there
//! is no pagination.

use crate::error::Result;
use crate::highlight::{palette, Highlighter, Rgba};
use crate::rendering::{font, Canvas, RasterImage, CANVAS_SIZE};

const HEADER_BAR: Rgba = (0x2d, 0x2d, 0x30, 0xff);
const STATUS_BAR: Rgba = (0x00, 0x7a, 0xcc, 0xff);
const WINDOW_CONTROLS: [Rgba; 3] = [
    (0xff, 0x5f, 0x57, 0xff),
    (0xff, 0xbd, 0x2e, 0xff),
    (0x28, 0xca, 0x42, 0xff),
];
const ACCENT_FROM: Rgba = (86, 156, 214, 77);
const ACCENT_TO: Rgba = (86, 156, 214, 26);

/// Positional constants for the code frame
#[derive(Debug, Clone)]
pub struct CodeFrameConfig {
    pub font_px: u32,
    pub line_height: i32,
    pub start_y: i32,
    pub left_padding: i32,
    pub line_number_width: i32,
    /// Lines whose y exceeds this are clipped
    pub max_y: i32,
    pub tab_label: String,
}

impl Default for CodeFrameConfig {
    fn default() -> Self {
        Self {
            font_px: 16,
            line_height: 24,
            start_y: 100,
            left_padding: 80,
            line_number_width: 60,
            max_y: 1050,
            tab_label: "code.js".to_string(),
        }
    }
}

/// Renders code snippets into editor-style share images
pub struct CodeRenderer {
    config: CodeFrameConfig,
    highlighter: Highlighter,
}

impl Default for CodeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeRenderer {
    pub fn new() -> Self {
        Self {
            config: CodeFrameConfig::default(),
            highlighter: Highlighter::new(),
        }
    }

    pub fn with_config(config: CodeFrameConfig) -> Self {
        Self {
            config,
            highlighter: Highlighter::new(),
        }
    }

    /// Render `code` into a 1080x1080 frame.
    ///
    /// Pure function of the input: the same snippet always produces the same
    /// bytes. Fails only when the surface cannot be acquired or encoded.
    pub fn render(&self, code: &str) -> Result<RasterImage> {
        let size = CANVAS_SIZE as f32;
        let mut canvas = Canvas::new(CANVAS_SIZE, CANVAS_SIZE)?;
        let cfg = &self.config;
        let scale = font::scale_for_px(cfg.font_px);

        // Background: vertical editor gradient.
        canvas.fill_rect_gradient(
            0.0,
            0.0,
            size,
            size,
            (0.0, 0.0),
            (0.0, size),
            palette::BACKGROUND,
            palette::BACKGROUND_SECONDARY,
        );

        // Header bar, window controls, file tab.
        canvas.fill_rect(0.0, 0.0, size, 60.0, HEADER_BAR);
        for (i, control) in WINDOW_CONTROLS.iter().enumerate() {
            canvas.fill_circle(30.0 + i as f32 * 25.0, 30.0, 8.0, *control);
        }
        canvas.fill_rect(120.0, 0.0, 200.0, 60.0, palette::BACKGROUND);
        canvas.draw_text(&cfg.tab_label, 140, 22, scale, palette::FOREGROUND);

        // Line-number gutter and separator.
        let gutter = cfg.line_number_width as f32;
        canvas.fill_rect(0.0, 60.0, gutter, size - 60.0, palette::BACKGROUND_SECONDARY);
        canvas.fill_rect(gutter, 60.0, 1.0, size - 60.0, palette::BORDER);

        // Source lines.
        let lines: Vec<&str> = code.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            let y = cfg.start_y + i as i32 * cfg.line_height;
            if y > cfg.max_y {
                continue;
            }

            canvas.draw_text_right(
                &(i + 1).to_string(),
                cfg.line_number_width - 10,
                y,
                scale,
                palette::LINE_NUMBER,
            );

            if line.trim().is_empty() {
                continue;
            }
            let mut x = cfg.left_padding;
            for token in self.highlighter.tokenize(line) {
                canvas.draw_text(&token.text, x, y, scale, token.color);
                x += font::text_width(&token.text, scale) as i32;
            }
        }

        // Decorative border and corner accent.
        canvas.stroke_rect(20.0, 80.0, 1040.0, 980.0, 2.0, palette::BORDER);
        canvas.fill_triangle_gradient(
            [(1000.0, 100.0), (1040.0, 100.0), (1040.0, 140.0)],
            (1000.0, 100.0),
            (1060.0, 160.0),
            ACCENT_FROM,
            ACCENT_TO,
        );

        // Status bar with line/character counts.
        canvas.fill_rect(0.0, size - 40.0, size, 40.0, STATUS_BAR);
        canvas.draw_text("Generated with VS Code Style", 20, 1056, 1, (255, 255, 255, 255));
        let counts = format!("{} lines - {} characters", lines.len(), code.chars().count());
        canvas.draw_text_right(&counts, 1060, 1056, 1, (255, 255, 255, 255));

        canvas.finish()
    }
}
