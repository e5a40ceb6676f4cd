//! Lock-screen notification descriptions.
//!
//! # Invariants
//! - Every lock-screen post uses `LOCK_SCREEN_NOTIFICATION_ID`, so at most one
//!   notification from this bridge is ever visible. A new post replaces it.

/// Channel id registered by `initialize`.
pub const LOCK_SCREEN_CHANNEL_ID: &str = "dua_lockscreen";
/// Fixed notification identity.
pub const LOCK_SCREEN_NOTIFICATION_ID: i32 = 1001;

const CHANNEL_NAME: &str = "Daily Dua";
const CHANNEL_DESCRIPTION: &str = "Shows daily dua on lock screen";
const CONTENT_TITLE: &str = "Daily Dua Reminder";
const BIG_CONTENT_TITLE: &str = "مناجات مقبول - Today's Dua";
const SUMMARY_TEXT: &str = "Tap to open app";
const SMALL_ICON: &str = "launcher_icon";
const CATEGORY_REMINDER: &str = "reminder";

/// `NotificationManager.IMPORTANCE_*` values in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Low,
}

impl Importance {
    pub fn android_value(self) -> i32 {
        match self {
            Self::Low => 2,
        }
    }
}

/// `Notification.VISIBILITY_*` values in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
}

impl Visibility {
    pub fn android_value(self) -> i32 {
        match self {
            Self::Public => 1,
        }
    }
}

/// `Notification.PRIORITY_*` values in use, read below channel-capable API levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Default,
}

impl Priority {
    pub fn android_value(self) -> i32 {
        match self {
            Self::Default => 0,
        }
    }
}

/// Notification channel declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: Importance,
    pub show_badge: bool,
    pub lockscreen_visibility: Visibility,
}

impl ChannelSpec {
    /// Low-importance, non-badged channel for the lock-screen dua.
    pub fn lock_screen() -> Self {
        Self {
            id: LOCK_SCREEN_CHANNEL_ID,
            name: CHANNEL_NAME,
            description: CHANNEL_DESCRIPTION,
            importance: Importance::Low,
            show_badge: false,
            lockscreen_visibility: Visibility::Public,
        }
    }
}

/// Text payload for one publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub arabic_text: String,
}

/// Fully resolved notification handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSpec {
    pub channel_id: &'static str,
    pub title: &'static str,
    /// Collapsed body.
    pub text: String,
    /// Expanded body.
    pub big_text: String,
    pub big_title: &'static str,
    pub summary: &'static str,
    pub small_icon: &'static str,
    pub ongoing: bool,
    pub auto_cancel: bool,
    pub visibility: Visibility,
    pub priority: Priority,
    pub category: &'static str,
}

impl NotificationSpec {
    /// Persistent, non-dismissible public notification showing `payload`.
    pub fn lock_screen(payload: &NotificationPayload) -> Self {
        Self {
            channel_id: LOCK_SCREEN_CHANNEL_ID,
            title: CONTENT_TITLE,
            text: payload.arabic_text.clone(),
            big_text: payload.arabic_text.clone(),
            big_title: BIG_CONTENT_TITLE,
            summary: SUMMARY_TEXT,
            small_icon: SMALL_ICON,
            ongoing: true,
            auto_cancel: false,
            visibility: Visibility::Public,
            priority: Priority::Default,
            category: CATEGORY_REMINDER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelSpec, Importance, NotificationPayload, NotificationSpec, Visibility};

    #[test]
    fn lock_screen_spec_uses_payload_for_both_bodies() {
        let spec = NotificationSpec::lock_screen(&NotificationPayload {
            arabic_text: "رَبَّنَا".to_string(),
        });
        assert_eq!(spec.text, "رَبَّنَا");
        assert_eq!(spec.big_text, "رَبَّنَا");
        assert!(spec.ongoing);
        assert!(!spec.auto_cancel);
        assert_eq!(spec.visibility, Visibility::Public);
    }

    #[test]
    fn lock_screen_channel_is_low_importance_without_badge() {
        let channel = ChannelSpec::lock_screen();
        assert_eq!(channel.importance, Importance::Low);
        assert!(!channel.show_badge);
        assert_eq!(channel.lockscreen_visibility.android_value(), 1);
        assert_eq!(channel.importance.android_value(), 2);
    }
}
