//! Channel handlers for the lock-screen and wallpaper bridges.

use super::{MethodCall, MethodCallHandler, MethodResult};
use crate::model::wallpaper::WallpaperRequest;
use crate::notification::LockScreenBridge;
use crate::wallpaper::WallpaperBridge;
use log::warn;

pub const LOCK_SCREEN_CHANNEL: &str = "com.munajat.lockscreen";
pub const WALLPAPER_CHANNEL: &str = "com.munajat.wallpaper";

pub const METHOD_INITIALIZE_LOCK_SCREEN: &str = "initializeLockScreen";
pub const METHOD_SHOW_LOCK_SCREEN_DUA: &str = "showLockScreenDua";
pub const METHOD_SET_WALLPAPER: &str = "setWallpaper";

const ARG_ARABIC_TEXT: &str = "arabicText";
const ARG_PATH: &str = "path";

/// `com.munajat.lockscreen` handler.
pub struct LockScreenChannel {
    bridge: LockScreenBridge,
}

impl LockScreenChannel {
    pub fn new(bridge: LockScreenBridge) -> Self {
        Self { bridge }
    }
}

impl MethodCallHandler for LockScreenChannel {
    fn channel_name(&self) -> &'static str {
        LOCK_SCREEN_CHANNEL
    }

    fn on_method_call(&self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            METHOD_INITIALIZE_LOCK_SCREEN => MethodResult::success(self.bridge.initialize()),
            METHOD_SHOW_LOCK_SCREEN_DUA => {
                let text = call.argument_str(ARG_ARABIC_TEXT).unwrap_or_default();
                MethodResult::success(self.bridge.show(text))
            }
            other => {
                warn!(
                    "event=method_call module=channel status=not_implemented channel={} method={}",
                    LOCK_SCREEN_CHANNEL, other
                );
                MethodResult::NotImplemented
            }
        }
    }
}

/// `com.munajat.wallpaper` handler.
pub struct WallpaperChannel {
    bridge: WallpaperBridge,
}

impl WallpaperChannel {
    pub fn new(bridge: WallpaperBridge) -> Self {
        Self { bridge }
    }
}

impl MethodCallHandler for WallpaperChannel {
    fn channel_name(&self) -> &'static str {
        WALLPAPER_CHANNEL
    }

    fn on_method_call(&self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            METHOD_SET_WALLPAPER => {
                let request = WallpaperRequest::from_argument(call.argument_str(ARG_PATH));
                match self.bridge.set_wallpaper(&request) {
                    Ok(ack) => MethodResult::success(ack),
                    Err(err) => MethodResult::error(err.code(), err.message()),
                }
            }
            other => {
                warn!(
                    "event=method_call module=channel status=not_implemented channel={} method={}",
                    WALLPAPER_CHANNEL, other
                );
                MethodResult::NotImplemented
            }
        }
    }
}
