use munajat_core::model::notification::{LOCK_SCREEN_CHANNEL_ID, LOCK_SCREEN_NOTIFICATION_ID};
use munajat_core::notification::{INITIALIZED_ACK, SHOWN_ACK};
use munajat_core::platform::memory::RecordingNotificationService;
use munajat_core::LockScreenBridge;
use std::sync::Arc;

#[test]
fn initialize_creates_channel_idempotently() {
    let service = Arc::new(RecordingNotificationService::new(true));
    let bridge = LockScreenBridge::new(service.clone());

    assert_eq!(bridge.initialize(), INITIALIZED_ACK);
    assert_eq!(bridge.initialize(), INITIALIZED_ACK);

    assert_eq!(service.channel_count(), 1);
    let channel = service
        .channel(LOCK_SCREEN_CHANNEL_ID)
        .expect("lock-screen channel exists");
    assert_eq!(channel.name, "Daily Dua");
    assert!(!channel.show_badge);
}

#[test]
fn initialize_is_a_no_op_without_channel_support() {
    let service = Arc::new(RecordingNotificationService::new(false));
    let bridge = LockScreenBridge::new(service.clone());

    assert_eq!(bridge.initialize(), INITIALIZED_ACK);
    assert_eq!(service.channel_count(), 0);
}

#[test]
fn second_show_replaces_first_notification() {
    let service = Arc::new(RecordingNotificationService::new(true));
    let bridge = LockScreenBridge::new(service.clone());
    bridge.initialize();

    assert_eq!(bridge.show("اللَّهُمَّ"), SHOWN_ACK);
    assert_eq!(bridge.show("رَبَّنَا آتِنَا"), SHOWN_ACK);

    let visible = service.visible();
    assert_eq!(visible.len(), 1);
    let shown = visible
        .get(&LOCK_SCREEN_NOTIFICATION_ID)
        .expect("fixed notification id");
    assert_eq!(shown.text, "رَبَّنَا آتِنَا");
    assert_eq!(shown.big_text, "رَبَّنَا آتِنَا");
    assert!(shown.ongoing);
    assert!(!shown.auto_cancel);
    assert_eq!(service.post_count(), 2);
}

#[test]
fn platform_failures_are_acknowledged_not_surfaced() {
    let service = Arc::new(RecordingNotificationService::new(true).failing("permission revoked"));
    let bridge = LockScreenBridge::new(service.clone());

    assert_eq!(bridge.initialize(), INITIALIZED_ACK);
    assert_eq!(bridge.show("text"), SHOWN_ACK);
    assert!(service.visible().is_empty());
}
