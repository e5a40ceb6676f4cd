//! Platform bridge core for the Munajat app.
//! Holds the widget, lock-screen and wallpaper bridge logic; OS services are injected.

pub mod bridges;
pub mod channel;
pub mod config;
pub mod logging;
pub mod model;
pub mod notification;
pub mod platform;
pub mod render;
pub mod wallpaper;
pub mod widget;

pub use bridges::{Bridges, Capabilities};
pub use channel::{
    DispatchError, MethodCall, MethodCallHandler, MethodChannelRegistry, MethodResult,
    LOCK_SCREEN_CHANNEL, WALLPAPER_CHANNEL,
};
pub use config::{BridgeConfig, ConfigError, RenderConfig};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::notification::{ChannelSpec, NotificationPayload, NotificationSpec};
pub use model::wallpaper::WallpaperRequest;
pub use model::widget::{LaunchAction, WidgetContent, WidgetViews};
pub use notification::LockScreenBridge;
pub use platform::{
    day_name_or_system, Clock, FontHandle, KeyValueStore, LineMetrics, NotificationService,
    PlatformError, PlatformResult, SystemClock, TextRasterizer, WallpaperService, WidgetHost,
};
pub use render::{HeadlessRasterizer, RenderDegradation, RenderOutcome, TextBitmapRenderer};
pub use wallpaper::{WallpaperBridge, WallpaperError};
pub use widget::{WidgetRenderer, WidgetUpdateReport};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
