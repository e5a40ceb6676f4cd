//! Best-effort text-to-bitmap rendering.
//!
//! # Responsibility
//! - Lay out the widget's primary text on a fixed canvas and center the block.
//! - Apply the configured font when loadable, otherwise the system default.
//!
//! # Invariants
//! - `render` always returns a canvas of the configured size.
//! - Font, line and truncation problems are recorded as degradations and
//!   logged; none of them abort the render.

use crate::config::{ConfigError, RenderConfig};
use crate::platform::{FontHandle, TextRasterizer};
use crate::render::layout::{layout_text, TextLayout};
use image::{imageops, Rgba, RgbaImage};
use log::{debug, warn};
use std::sync::Arc;

/// Something that went wrong but was absorbed by the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDegradation {
    /// The custom font could not be loaded; the system default was used.
    FontFallback { resource: String, reason: String },
    /// One line could not be rasterized and was left blank.
    LineSkipped { index: usize, reason: String },
    /// Lines beyond the configured maximum were dropped.
    Truncated { dropped_lines: usize },
}

/// Rendered canvas plus everything that degraded along the way.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub bitmap: RgbaImage,
    pub font: FontHandle,
    pub degradations: Vec<RenderDegradation>,
}

impl RenderOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Renders text into a fixed-size transparent canvas.
pub struct TextBitmapRenderer {
    config: RenderConfig,
    color: Rgba<u8>,
    rasterizer: Arc<dyn TextRasterizer>,
}

impl TextBitmapRenderer {
    /// Creates a renderer after validating `config`.
    pub fn new(config: RenderConfig, rasterizer: Arc<dyn TextRasterizer>) -> Result<Self, ConfigError> {
        config.validate()?;
        let color = config.color()?;
        Ok(Self {
            config,
            color,
            rasterizer,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `text` centered on the canvas.
    pub fn render(&self, text: &str) -> RenderOutcome {
        let mut degradations = Vec::new();
        let font = self.resolve_font(&mut degradations);
        let size = self.config.text_size;
        let layout_width = self.config.layout_width() as f32;

        let measure = |line: &str| self.rasterizer.measure(&font, size, line);
        let layout = layout_text(text, layout_width, self.config.max_lines, &measure);
        if layout.dropped_lines > 0 {
            debug!(
                "event=render_truncated module=render status=ok dropped_lines={}",
                layout.dropped_lines
            );
            degradations.push(RenderDegradation::Truncated {
                dropped_lines: layout.dropped_lines,
            });
        }

        let mut bitmap = RgbaImage::new(self.config.canvas_width, self.config.canvas_height);
        self.draw_layout(&mut bitmap, &font, &layout, &mut degradations);

        RenderOutcome {
            bitmap,
            font,
            degradations,
        }
    }

    fn resolve_font(&self, degradations: &mut Vec<RenderDegradation>) -> FontHandle {
        let Some(resource) = self.config.font_resource.as_deref() else {
            return FontHandle::SystemDefault;
        };
        match self.rasterizer.load_font(resource) {
            Ok(font) => font,
            Err(err) => {
                warn!(
                    "event=font_fallback module=render status=degraded resource={} error={}",
                    resource, err
                );
                degradations.push(RenderDegradation::FontFallback {
                    resource: resource.to_string(),
                    reason: err.to_string(),
                });
                FontHandle::SystemDefault
            }
        }
    }

    fn draw_layout(
        &self,
        bitmap: &mut RgbaImage,
        font: &FontHandle,
        layout: &TextLayout,
        degradations: &mut Vec<RenderDegradation>,
    ) {
        if layout.is_empty() {
            return;
        }
        let size = self.config.text_size;
        let metrics = self.rasterizer.line_metrics(font, size);
        let line_height = metrics.height() * self.config.line_spacing_multiplier;
        let extra = self.config.line_spacing_extra;
        let line_count = layout.lines.len() as f32;
        let block_height = line_count * line_height + (line_count - 1.0) * extra;

        let canvas_width = self.config.canvas_width as f32;
        let layout_width = self.config.layout_width() as f32;
        let block_left = (canvas_width - layout_width) / 2.0;
        let block_top = (self.config.canvas_height as f32 - block_height) / 2.0;

        for (index, line) in layout.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            let x = block_left + (layout_width - line.width) / 2.0;
            let y = block_top + index as f32 * (line_height + extra);
            match self
                .rasterizer
                .rasterize_line(font, size, self.color, &line.text)
            {
                Ok(raster) => {
                    imageops::overlay(bitmap, &raster, x.round() as i64, y.round() as i64);
                }
                Err(err) => {
                    warn!(
                        "event=line_skipped module=render status=degraded line={} error={}",
                        index, err
                    );
                    degradations.push(RenderDegradation::LineSkipped {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}
