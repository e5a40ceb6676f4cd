//! Injected OS capability contracts.
//!
//! # Responsibility
//! - Describe every OS service the bridges touch as a narrow trait.
//! - Keep bridge logic free of ambient singletons so fakes can stand in.
//!
//! # Invariants
//! - Capabilities are `Send + Sync` and shared as `Arc<dyn _>`.
//! - Implementations report failures as `PlatformError`, never panic.

pub mod memory;

use crate::model::notification::{ChannelSpec, NotificationSpec};
use crate::model::widget::WidgetViews;
use image::{Rgba, RgbaImage};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failure reported by an OS capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The service handle could not be obtained (no context, no VM, ...).
    Unavailable(String),
    /// A named resource (font, layout, view id) does not exist.
    ResourceNotFound(String),
    /// The OS call itself failed or threw.
    CallFailed(String),
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(f, "platform service unavailable: {detail}"),
            Self::ResourceNotFound(name) => write!(f, "platform resource not found: {name}"),
            Self::CallFailed(detail) => write!(f, "platform call failed: {detail}"),
        }
    }
}

impl Error for PlatformError {}

/// Read-only string store shared with the host application.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
}

impl KeyValueStore for std::collections::HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl KeyValueStore for std::collections::BTreeMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Home-screen widget manager.
pub trait WidgetHost: Send + Sync {
    /// OS API level used to pick pending-intent flags.
    fn sdk_int(&self) -> u32;
    fn update_widget(&self, widget_id: i32, views: &WidgetViews) -> PlatformResult<()>;
}

/// Notification manager.
pub trait NotificationService: Send + Sync {
    /// Whether the OS groups notifications into channels.
    fn supports_channels(&self) -> bool;
    /// Creates or updates a channel. Repeated calls with the same id are harmless.
    fn create_channel(&self, channel: &ChannelSpec) -> PlatformResult<()>;
    /// Posts a notification, replacing any live notification with the same id.
    fn notify(&self, id: i32, notification: &NotificationSpec) -> PlatformResult<()>;
}

/// Wallpaper manager.
pub trait WallpaperService: Send + Sync {
    /// Applies `bitmap` to the lock screen only.
    fn set_lock_screen_bitmap(&self, bitmap: &RgbaImage) -> PlatformResult<()>;
}

/// Font selection used by a rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontHandle {
    SystemDefault,
    Resource(String),
}

/// Vertical metrics for one line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

impl LineMetrics {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Text shaping and glyph drawing backend.
///
/// Shaping (joining, bidi) is the backend's job. Line breaking and placement
/// live in `render`.
pub trait TextRasterizer: Send + Sync {
    /// Resolves a bundled font resource.
    fn load_font(&self, resource: &str) -> PlatformResult<FontHandle>;
    fn line_metrics(&self, font: &FontHandle, size: f32) -> LineMetrics;
    /// Advance width of `text` set on one line.
    fn measure(&self, font: &FontHandle, size: f32, text: &str) -> f32;
    /// Draws `text` into a transparent image exactly one line box tall.
    fn rasterize_line(
        &self,
        font: &FontHandle,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    ) -> PlatformResult<RgbaImage>;
}

/// Local wall clock.
pub trait Clock: Send + Sync {
    /// Full weekday name for today, e.g. `Friday`.
    fn day_name(&self) -> String;
}

/// `Clock` backed by the process local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn day_name(&self) -> String {
        chrono::Local::now().format("%A").to_string()
    }
}

/// Takes a locale-formatted day name, or the `SystemClock` name when the
/// lookup failed or came back blank.
pub fn day_name_or_system(localized: PlatformResult<String>) -> String {
    match localized {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => SystemClock.day_name(),
        Err(err) => {
            log::warn!(
                "event=day_name module=platform status=fallback error={}",
                err
            );
            SystemClock.day_name()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{day_name_or_system, PlatformError};

    const ENGLISH_DAYS: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    #[test]
    fn localized_day_name_is_kept() {
        assert_eq!(day_name_or_system(Ok("الجمعة".to_string())), "الجمعة");
    }

    #[test]
    fn failed_lookup_uses_system_day_name() {
        let name = day_name_or_system(Err(PlatformError::CallFailed("no locale".to_string())));
        assert!(ENGLISH_DAYS.contains(&name.as_str()), "{name}");
    }

    #[test]
    fn blank_lookup_uses_system_day_name() {
        let name = day_name_or_system(Ok("  ".to_string()));
        assert!(ENGLISH_DAYS.contains(&name.as_str()), "{name}");
    }
}
