//! In-process capability implementations.
//!
//! Used by tests and by desktop builds where no OS widget, notification or
//! wallpaper service exists. Each one records what the OS would display.

use super::{Clock, NotificationService, PlatformError, PlatformResult, WallpaperService, WidgetHost};
use crate::model::notification::{ChannelSpec, NotificationSpec};
use crate::model::widget::WidgetViews;
use image::RgbaImage;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Widget host that keeps the latest views per widget id.
#[derive(Debug)]
pub struct RecordingWidgetHost {
    sdk_int: u32,
    failing_ids: BTreeSet<i32>,
    widgets: Mutex<BTreeMap<i32, WidgetViews>>,
}

impl RecordingWidgetHost {
    pub fn new(sdk_int: u32) -> Self {
        Self {
            sdk_int,
            failing_ids: BTreeSet::new(),
            widgets: Mutex::new(BTreeMap::new()),
        }
    }

    /// Makes updates for `widget_id` fail, as for a stale instance.
    pub fn failing_for(mut self, widget_id: i32) -> Self {
        self.failing_ids.insert(widget_id);
        self
    }

    pub fn views(&self, widget_id: i32) -> Option<WidgetViews> {
        lock(&self.widgets).get(&widget_id).cloned()
    }

    pub fn updated_ids(&self) -> Vec<i32> {
        lock(&self.widgets).keys().copied().collect()
    }
}

impl WidgetHost for RecordingWidgetHost {
    fn sdk_int(&self) -> u32 {
        self.sdk_int
    }

    fn update_widget(&self, widget_id: i32, views: &WidgetViews) -> PlatformResult<()> {
        if self.failing_ids.contains(&widget_id) {
            return Err(PlatformError::CallFailed(format!(
                "widget {widget_id} is not bound"
            )));
        }
        lock(&self.widgets).insert(widget_id, views.clone());
        Ok(())
    }
}

/// Notification service that models the visible notification shade.
#[derive(Debug)]
pub struct RecordingNotificationService {
    supports_channels: bool,
    channels: Mutex<BTreeMap<String, ChannelSpec>>,
    visible: Mutex<BTreeMap<i32, NotificationSpec>>,
    post_count: Mutex<usize>,
    failure: Option<String>,
}

impl RecordingNotificationService {
    pub fn new(supports_channels: bool) -> Self {
        Self {
            supports_channels,
            channels: Mutex::new(BTreeMap::new()),
            visible: Mutex::new(BTreeMap::new()),
            post_count: Mutex::new(0),
            failure: None,
        }
    }

    /// Makes every call fail with `detail`.
    pub fn failing(mut self, detail: impl Into<String>) -> Self {
        self.failure = Some(detail.into());
        self
    }

    pub fn channel(&self, id: &str) -> Option<ChannelSpec> {
        lock(&self.channels).get(id).cloned()
    }

    pub fn channel_count(&self) -> usize {
        lock(&self.channels).len()
    }

    /// Notifications currently shown, keyed by id.
    pub fn visible(&self) -> BTreeMap<i32, NotificationSpec> {
        lock(&self.visible).clone()
    }

    pub fn post_count(&self) -> usize {
        *lock(&self.post_count)
    }

    fn check(&self) -> PlatformResult<()> {
        match &self.failure {
            Some(detail) => Err(PlatformError::CallFailed(detail.clone())),
            None => Ok(()),
        }
    }
}

impl NotificationService for RecordingNotificationService {
    fn supports_channels(&self) -> bool {
        self.supports_channels
    }

    fn create_channel(&self, channel: &ChannelSpec) -> PlatformResult<()> {
        self.check()?;
        lock(&self.channels).insert(channel.id.to_string(), channel.clone());
        Ok(())
    }

    fn notify(&self, id: i32, notification: &NotificationSpec) -> PlatformResult<()> {
        self.check()?;
        lock(&self.visible).insert(id, notification.clone());
        *lock(&self.post_count) += 1;
        Ok(())
    }
}

/// Wallpaper service that keeps the last lock-screen bitmap.
#[derive(Debug, Default)]
pub struct RecordingWallpaperService {
    lock_screen: Mutex<Option<RgbaImage>>,
    failure: Option<String>,
}

impl RecordingWallpaperService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every apply fail with `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            lock_screen: Mutex::new(None),
            failure: Some(detail.into()),
        }
    }

    pub fn lock_screen(&self) -> Option<RgbaImage> {
        lock(&self.lock_screen).clone()
    }
}

impl WallpaperService for RecordingWallpaperService {
    fn set_lock_screen_bitmap(&self, bitmap: &RgbaImage) -> PlatformResult<()> {
        if let Some(detail) = &self.failure {
            return Err(PlatformError::CallFailed(detail.clone()));
        }
        *lock(&self.lock_screen) = Some(bitmap.clone());
        Ok(())
    }
}

/// Clock that always reports the same weekday.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn day_name(&self) -> String {
        self.0.clone()
    }
}
