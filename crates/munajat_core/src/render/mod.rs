//! Widget text rendering.
//!
//! # Responsibility
//! - Break text into lines and place them on a fixed canvas.
//! - Apply the render-best-effort policy: degrade, log, and keep going.
//!
//! # See also
//! - `platform::TextRasterizer` for the glyph backend contract.

pub mod bitmap;
pub mod headless;
pub mod layout;

pub use bitmap::{RenderDegradation, RenderOutcome, TextBitmapRenderer};
pub use headless::HeadlessRasterizer;
pub use layout::{layout_text, LaidOutLine, TextLayout};
