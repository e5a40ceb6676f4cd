//! Home-screen widget content and view description.

use crate::platform::KeyValueStore;
use image::RgbaImage;

/// Store key for the primary Arabic text.
pub const KEY_ARABIC_TEXT: &str = "widget_arabic_text";
/// Store key for the translation line.
pub const KEY_TRANSLATION: &str = "widget_translation";
/// Store key for the progress label.
pub const KEY_PROGRESS: &str = "widget_progress";

pub const DEFAULT_ARABIC_TEXT: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
pub const DEFAULT_TRANSLATION: &str = "Select a dua from the app to display here";
pub const DEFAULT_PROGRESS: &str = "Day 1";

/// Layout resource inflated for every widget instance.
pub const WIDGET_LAYOUT: &str = "home_screen_widget";
pub const VIEW_ARABIC_IMAGE: &str = "widget_arabic_image";
pub const VIEW_TRANSLATION: &str = "widget_translation";
pub const VIEW_PROGRESS: &str = "widget_progress";
pub const VIEW_DATE: &str = "widget_date";
pub const VIEW_MAIN_CONTENT: &str = "main_content";
pub const VIEW_FOOTER: &str = "footer_section";

/// Sub-regions that open the app when tapped.
pub const TAP_TARGETS: [&str; 3] = [VIEW_ARABIC_IMAGE, VIEW_MAIN_CONTENT, VIEW_FOOTER];

/// `Intent.FLAG_ACTIVITY_NEW_TASK`.
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;
/// `Intent.FLAG_ACTIVITY_CLEAR_TOP`.
pub const FLAG_ACTIVITY_CLEAR_TOP: i32 = 0x0400_0000;
/// `PendingIntent.FLAG_UPDATE_CURRENT`.
pub const FLAG_UPDATE_CURRENT: i32 = 0x0800_0000;
/// `PendingIntent.FLAG_IMMUTABLE`.
pub const FLAG_IMMUTABLE: i32 = 0x0400_0000;
/// First API level that requires an explicit pending-intent mutability flag.
pub const SDK_REQUIRES_MUTABILITY_FLAG: u32 = 31;

/// Text shown by one widget render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetContent {
    pub arabic_text: String,
    pub translation: String,
    pub progress: String,
    /// Localized weekday name, derived at render time.
    pub day_name: String,
}

impl WidgetContent {
    /// Reads the widget fields, substituting literal fallbacks for absent keys.
    ///
    /// An empty stored string is kept as-is; only a missing key falls back.
    pub fn from_store(store: &dyn KeyValueStore, day_name: impl Into<String>) -> Self {
        Self {
            arabic_text: store
                .get_string(KEY_ARABIC_TEXT)
                .unwrap_or_else(|| DEFAULT_ARABIC_TEXT.to_string()),
            translation: store
                .get_string(KEY_TRANSLATION)
                .unwrap_or_else(|| DEFAULT_TRANSLATION.to_string()),
            progress: store
                .get_string(KEY_PROGRESS)
                .unwrap_or_else(|| DEFAULT_PROGRESS.to_string()),
            day_name: day_name.into(),
        }
    }
}

/// Tap action that brings the host activity to the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchAction {
    pub request_code: i32,
    pub intent_flags: i32,
    pub pending_intent_flags: i32,
}

impl LaunchAction {
    /// Builds the launch action for the given OS API level.
    pub fn for_sdk(sdk_int: u32) -> Self {
        let pending_intent_flags = if sdk_int >= SDK_REQUIRES_MUTABILITY_FLAG {
            FLAG_UPDATE_CURRENT | FLAG_IMMUTABLE
        } else {
            FLAG_UPDATE_CURRENT
        };
        Self {
            request_code: 0,
            intent_flags: FLAG_ACTIVITY_NEW_TASK | FLAG_ACTIVITY_CLEAR_TOP,
            pending_intent_flags,
        }
    }
}

/// One text view assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBinding {
    pub view_id: &'static str,
    pub text: String,
}

/// Complete view hierarchy update for one widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetViews {
    pub layout: &'static str,
    pub image_view_id: &'static str,
    pub image: RgbaImage,
    pub texts: Vec<TextBinding>,
    pub click_targets: Vec<&'static str>,
    pub launch: LaunchAction,
}

impl WidgetViews {
    /// Assembles the view update from content and its rendered text bitmap.
    pub fn build(content: &WidgetContent, image: RgbaImage, launch: LaunchAction) -> Self {
        Self {
            layout: WIDGET_LAYOUT,
            image_view_id: VIEW_ARABIC_IMAGE,
            image,
            texts: vec![
                TextBinding {
                    view_id: VIEW_TRANSLATION,
                    text: content.translation.clone(),
                },
                TextBinding {
                    view_id: VIEW_PROGRESS,
                    text: content.progress.clone(),
                },
                TextBinding {
                    view_id: VIEW_DATE,
                    text: content.day_name.clone(),
                },
            ],
            click_targets: TAP_TARGETS.to_vec(),
            launch,
        }
    }

    /// Returns the text bound to `view_id`, if any.
    pub fn text_for(&self, view_id: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|binding| binding.view_id == view_id)
            .map(|binding| binding.text.as_str())
    }
}
