//! Fixed-advance rasterizer for previews and tests off-device.
//!
//! Draws one filled cell per grapheme base character. It performs no shaping,
//! so Arabic output is a block silhouette, not readable text.

use crate::platform::{FontHandle, LineMetrics, PlatformError, PlatformResult, TextRasterizer};
use crate::render::layout::starts_cluster;
use image::{Rgba, RgbaImage};
use std::collections::BTreeSet;

const ASCENT_RATIO: f32 = 0.8;
const DESCENT_RATIO: f32 = 0.25;

/// Deterministic `TextRasterizer` with a configurable set of known fonts.
#[derive(Debug, Clone)]
pub struct HeadlessRasterizer {
    advance_ratio: f32,
    fonts: BTreeSet<String>,
}

impl Default for HeadlessRasterizer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl HeadlessRasterizer {
    /// Creates a rasterizer whose cells are `advance_ratio * size` wide.
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            fonts: BTreeSet::new(),
        }
    }

    /// Makes `resource` loadable.
    pub fn with_font(mut self, resource: impl Into<String>) -> Self {
        self.fonts.insert(resource.into());
        self
    }

    fn cell_width(&self, size: f32) -> f32 {
        size * self.advance_ratio
    }
}

impl TextRasterizer for HeadlessRasterizer {
    fn load_font(&self, resource: &str) -> PlatformResult<FontHandle> {
        if self.fonts.contains(resource) {
            Ok(FontHandle::Resource(resource.to_string()))
        } else {
            Err(PlatformError::ResourceNotFound(format!("font/{resource}")))
        }
    }

    fn line_metrics(&self, _font: &FontHandle, size: f32) -> LineMetrics {
        LineMetrics {
            ascent: size * ASCENT_RATIO,
            descent: size * DESCENT_RATIO,
        }
    }

    fn measure(&self, _font: &FontHandle, size: f32, text: &str) -> f32 {
        let cells = text.chars().filter(|ch| starts_cluster(*ch)).count();
        cells as f32 * self.cell_width(size)
    }

    fn rasterize_line(
        &self,
        font: &FontHandle,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    ) -> PlatformResult<RgbaImage> {
        let metrics = self.line_metrics(font, size);
        let width = self.measure(font, size, text).ceil().max(1.0) as u32;
        let height = metrics.height().ceil().max(1.0) as u32;
        let cell = self.cell_width(size);
        let inset = (cell * 0.1).floor() as u32;
        let top = (metrics.ascent * 0.3) as u32;
        let bottom = (metrics.ascent as u32).min(height);

        let mut image = RgbaImage::new(width, height);
        let bases = text.chars().filter(|ch| starts_cluster(*ch));
        for (index, ch) in bases.enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = (index as f32 * cell) as u32 + inset;
            let right = (((index + 1) as f32 * cell) as u32)
                .saturating_sub(inset)
                .min(width);
            for y in top..bottom {
                for x in left..right {
                    image.put_pixel(x, y, color);
                }
            }
        }
        Ok(image)
    }
}
