//! Wiring of capabilities into the three bridges.

use crate::channel::{LockScreenChannel, MethodChannelRegistry, WallpaperChannel};
use crate::config::{BridgeConfig, ConfigError};
use crate::notification::LockScreenBridge;
use crate::platform::memory::{
    RecordingNotificationService, RecordingWallpaperService, RecordingWidgetHost,
};
use crate::platform::{
    Clock, NotificationService, SystemClock, TextRasterizer, WallpaperService, WidgetHost,
};
use crate::render::{HeadlessRasterizer, TextBitmapRenderer};
use crate::wallpaper::WallpaperBridge;
use crate::widget::WidgetRenderer;
use std::sync::Arc;

/// API level reported by the in-memory widget host.
const IN_MEMORY_SDK_INT: u32 = 34;

/// Every OS service the bridges need.
#[derive(Clone)]
pub struct Capabilities {
    pub widget_host: Arc<dyn WidgetHost>,
    pub notifications: Arc<dyn NotificationService>,
    pub wallpapers: Arc<dyn WallpaperService>,
    pub rasterizer: Arc<dyn TextRasterizer>,
    pub clock: Arc<dyn Clock>,
}

impl Capabilities {
    /// Recording services, the headless rasterizer and the system clock.
    pub fn in_memory() -> Self {
        Self {
            widget_host: Arc::new(RecordingWidgetHost::new(IN_MEMORY_SDK_INT)),
            notifications: Arc::new(RecordingNotificationService::new(true)),
            wallpapers: Arc::new(RecordingWallpaperService::new()),
            rasterizer: Arc::new(HeadlessRasterizer::default()),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Assembled bridges: the widget renderer plus the channel registry.
pub struct Bridges {
    pub widget: WidgetRenderer,
    pub channels: MethodChannelRegistry,
}

impl Bridges {
    /// Builds all bridges over `capabilities`.
    ///
    /// # Errors
    /// - Returns `ConfigError` when the render config is invalid.
    pub fn assemble(capabilities: &Capabilities, config: &BridgeConfig) -> Result<Self, ConfigError> {
        let renderer =
            TextBitmapRenderer::new(config.render.clone(), capabilities.rasterizer.clone())?;
        let widget = WidgetRenderer::new(
            capabilities.widget_host.clone(),
            renderer,
            capabilities.clock.clone(),
        );

        let mut channels = MethodChannelRegistry::new();
        let lock_screen = LockScreenBridge::new(capabilities.notifications.clone());
        let wallpaper = WallpaperBridge::new(capabilities.wallpapers.clone());
        channels
            .register(Arc::new(LockScreenChannel::new(lock_screen)))
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        channels
            .register(Arc::new(WallpaperChannel::new(wallpaper)))
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        Ok(Self { widget, channels })
    }
}
