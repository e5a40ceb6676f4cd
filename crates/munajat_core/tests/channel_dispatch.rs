use image::{Rgba, RgbaImage};
use munajat_core::channel::{
    METHOD_INITIALIZE_LOCK_SCREEN, METHOD_SET_WALLPAPER, METHOD_SHOW_LOCK_SCREEN_DUA,
};
use munajat_core::model::notification::LOCK_SCREEN_NOTIFICATION_ID;
use munajat_core::platform::memory::{
    FixedClock, RecordingNotificationService, RecordingWallpaperService, RecordingWidgetHost,
};
use munajat_core::{
    BridgeConfig, Bridges, Capabilities, DispatchError, HeadlessRasterizer, MethodCall,
    MethodResult, LOCK_SCREEN_CHANNEL, WALLPAPER_CHANNEL,
};
use serde_json::json;
use std::sync::Arc;

struct Fixture {
    bridges: Bridges,
    notifications: Arc<RecordingNotificationService>,
    wallpapers: Arc<RecordingWallpaperService>,
}

fn fixture() -> Fixture {
    let notifications = Arc::new(RecordingNotificationService::new(true));
    let wallpapers = Arc::new(RecordingWallpaperService::new());
    let capabilities = Capabilities {
        widget_host: Arc::new(RecordingWidgetHost::new(34)),
        notifications: notifications.clone(),
        wallpapers: wallpapers.clone(),
        rasterizer: Arc::new(HeadlessRasterizer::default()),
        clock: Arc::new(FixedClock("Monday".to_string())),
    };
    let bridges = Bridges::assemble(&capabilities, &BridgeConfig::default()).expect("assemble");
    Fixture {
        bridges,
        notifications,
        wallpapers,
    }
}

#[test]
fn registers_both_channels() {
    let fixture = fixture();
    assert_eq!(
        fixture.bridges.channels.channel_names(),
        vec![LOCK_SCREEN_CHANNEL.to_string(), WALLPAPER_CHANNEL.to_string()]
    );
}

#[test]
fn lock_screen_methods_return_acknowledgments() {
    let fixture = fixture();
    let channels = &fixture.bridges.channels;

    let init = channels
        .dispatch(LOCK_SCREEN_CHANNEL, &MethodCall::new(METHOD_INITIALIZE_LOCK_SCREEN, json!(null)))
        .expect("dispatch");
    assert_eq!(init, MethodResult::success("Initialized"));

    let shown = channels
        .dispatch(
            LOCK_SCREEN_CHANNEL,
            &MethodCall::new(METHOD_SHOW_LOCK_SCREEN_DUA, json!({"arabicText": "سُبْحَانَ اللَّهِ"})),
        )
        .expect("dispatch");
    assert_eq!(shown, MethodResult::success("Notification shown"));

    let visible = fixture.notifications.visible();
    assert_eq!(visible[&LOCK_SCREEN_NOTIFICATION_ID].text, "سُبْحَانَ اللَّهِ");
}

#[test]
fn missing_arabic_text_posts_empty_body() {
    let fixture = fixture();
    let result = fixture
        .bridges
        .channels
        .dispatch(LOCK_SCREEN_CHANNEL, &MethodCall::new(METHOD_SHOW_LOCK_SCREEN_DUA, json!({})))
        .expect("dispatch");
    assert!(result.is_success());
    assert_eq!(fixture.notifications.visible()[&LOCK_SCREEN_NOTIFICATION_ID].text, "");
}

#[test]
fn set_wallpaper_errors_are_tagged() {
    let fixture = fixture();
    let channels = &fixture.bridges.channels;

    let missing = channels
        .dispatch(WALLPAPER_CHANNEL, &MethodCall::new(METHOD_SET_WALLPAPER, json!({"path": null})))
        .expect("dispatch");
    assert_eq!(
        missing,
        MethodResult::error("INVALID_ARGUMENT", "Image path is required")
    );

    let dir = tempfile::tempdir().expect("temp dir");
    let corrupt = dir.path().join("broken.jpg");
    std::fs::write(&corrupt, [0xFF, 0xD8, 0x00]).expect("write fixture");
    let broken = channels
        .dispatch(
            WALLPAPER_CHANNEL,
            &MethodCall::new(METHOD_SET_WALLPAPER, json!({"path": corrupt.to_str()})),
        )
        .expect("dispatch");
    assert_eq!(broken, MethodResult::error("BITMAP_ERROR", "Failed to decode image"));
    assert!(fixture.wallpapers.lock_screen().is_none());
}

#[test]
fn set_wallpaper_success_through_channel() {
    let fixture = fixture();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bg.png");
    RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]))
        .save(&path)
        .expect("write fixture");

    let result = fixture
        .bridges
        .channels
        .dispatch(
            WALLPAPER_CHANNEL,
            &MethodCall::new(METHOD_SET_WALLPAPER, json!({"path": path.to_str()})),
        )
        .expect("dispatch");
    assert_eq!(result, MethodResult::success("Wallpaper set successfully"));
    assert!(fixture.wallpapers.lock_screen().is_some());
}

#[test]
fn unknown_method_is_not_implemented_and_unknown_channel_fails() {
    let fixture = fixture();
    let channels = &fixture.bridges.channels;

    let result = channels
        .dispatch(WALLPAPER_CHANNEL, &MethodCall::new("setHomeWallpaper", json!({})))
        .expect("dispatch");
    assert_eq!(result, MethodResult::NotImplemented);

    let err = channels
        .dispatch("com.munajat.widget", &MethodCall::new("update", json!({})))
        .expect_err("no such channel");
    assert_eq!(
        err,
        DispatchError::ChannelNotFound("com.munajat.widget".to_string())
    );
}

#[test]
fn assemble_rejects_invalid_render_config() {
    let mut config = BridgeConfig::default();
    config.render.canvas_width = 0;
    assert!(Bridges::assemble(&Capabilities::in_memory(), &config).is_err());
}
