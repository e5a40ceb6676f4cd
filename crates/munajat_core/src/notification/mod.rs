//! Lock-screen notification bridge.
//!
//! # Responsibility
//! - Ensure the lock-screen channel exists.
//! - Publish or replace the single lock-screen notification.
//!
//! # Invariants
//! - Every post uses `LOCK_SCREEN_NOTIFICATION_ID`; a second post replaces the first.
//! - Both commands acknowledge success; OS failures are logged, never surfaced.

use crate::model::notification::{
    ChannelSpec, NotificationPayload, NotificationSpec, LOCK_SCREEN_NOTIFICATION_ID,
};
use crate::platform::NotificationService;
use log::{debug, error, info};
use std::sync::Arc;

/// Acknowledgment returned by `initialize`.
pub const INITIALIZED_ACK: &str = "Initialized";
/// Acknowledgment returned by `show`.
pub const SHOWN_ACK: &str = "Notification shown";

/// Relays lock-screen commands to the notification service.
pub struct LockScreenBridge {
    notifications: Arc<dyn NotificationService>,
}

impl LockScreenBridge {
    pub fn new(notifications: Arc<dyn NotificationService>) -> Self {
        Self { notifications }
    }

    /// Ensures the low-importance lock-screen channel exists.
    ///
    /// No-op where the OS has no channel concept.
    pub fn initialize(&self) -> &'static str {
        if !self.notifications.supports_channels() {
            debug!("event=channel_init module=notification status=skipped reason=unsupported");
            return INITIALIZED_ACK;
        }
        let channel = ChannelSpec::lock_screen();
        match self.notifications.create_channel(&channel) {
            Ok(()) => info!(
                "event=channel_init module=notification status=ok channel_id={}",
                channel.id
            ),
            Err(err) => error!(
                "event=channel_init module=notification status=error channel_id={} error={}",
                channel.id, err
            ),
        }
        INITIALIZED_ACK
    }

    /// Publishes `arabic_text`, replacing any previous lock-screen notification.
    pub fn show(&self, arabic_text: &str) -> &'static str {
        let payload = NotificationPayload {
            arabic_text: arabic_text.to_string(),
        };
        let notification = NotificationSpec::lock_screen(&payload);
        match self
            .notifications
            .notify(LOCK_SCREEN_NOTIFICATION_ID, &notification)
        {
            Ok(()) => info!(
                "event=notification_show module=notification status=ok id={} text_chars={}",
                LOCK_SCREEN_NOTIFICATION_ID,
                arabic_text.chars().count()
            ),
            Err(err) => error!(
                "event=notification_show module=notification status=error id={} error={}",
                LOCK_SCREEN_NOTIFICATION_ID, err
            ),
        }
        SHOWN_ACK
    }
}
