//! snapdeck turns text into share-ready square images.
//!
//! Two pipelines share one deterministic rendering core: a code-to-image
//! path that paints a snippet as a dark-theme editor frame, and a carousel
//! path that segments long-form text into slides and paints each one with a
//! styled template. Rendering is pure; the same input, style, and position
//! always produce byte-identical PNG output.
//!
//! The [`Studio`] facade owns the chunk store and renderers on a worker
//! thread behind an async API. The lower-level pieces ([`segment`],
//! [`Highlighter`], [`CodeRenderer`], [`render_slide`], [`ChunkStore`],
//! [`export`]) are usable directly for synchronous callers.

pub mod error;
pub mod export;
pub mod highlight;
pub mod rendering;
pub mod segment;
pub mod store;
pub mod studio;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use export::{ArchiveEntry, ArchiveWriter, ExportedImage, ZipArchiveWriter};
pub use highlight::{Highlighter, Token};
pub use rendering::code::{CodeFrameConfig, CodeRenderer};
pub use rendering::slide::render_slide;
pub use rendering::{RasterImage, CANVAS_SIZE};
pub use segment::{segment, SegmentOptions};
pub use store::{Chunk, ChunkStore, Direction};
pub use studio::{ChunkSnapshot, Mode, Studio, StudioConfig, StudioSnapshot};

/// Carousel input cap in characters; longer input is truncated before
/// segmentation.
pub const CAROUSEL_CHAR_LIMIT: usize = 3000;

/// Slide background template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Blue corporate gradient
    Professional,
    /// Purple-to-pink gradient
    Creative,
    /// White with a light border
    Minimal,
}

/// Slide body text size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Body text size in pixels
    pub fn px(self) -> u32 {
        match self {
            FontSize::Small => 32,
            FontSize::Medium => 40,
            FontSize::Large => 48,
        }
    }
}

/// Visual configuration for slide rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub template: Template,
    pub font_size: FontSize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            template: Template::Professional,
            font_size: FontSize::Medium,
        }
    }
}
