use image::Rgba;
use munajat_core::model::widget::{
    DEFAULT_ARABIC_TEXT, DEFAULT_PROGRESS, DEFAULT_TRANSLATION, FLAG_IMMUTABLE,
    FLAG_UPDATE_CURRENT, KEY_ARABIC_TEXT, KEY_PROGRESS, KEY_TRANSLATION, TAP_TARGETS,
    VIEW_DATE, VIEW_PROGRESS, VIEW_TRANSLATION, WIDGET_LAYOUT,
};
use munajat_core::platform::memory::{FixedClock, RecordingWidgetHost};
use munajat_core::{
    FontHandle, LineMetrics, PlatformError, PlatformResult, RenderConfig, RenderDegradation,
    TextBitmapRenderer, TextRasterizer, WidgetRenderer,
};
use munajat_core::render::HeadlessRasterizer;
use std::collections::HashMap;
use std::sync::Arc;

fn widget_renderer(host: Arc<RecordingWidgetHost>, rasterizer: Arc<dyn TextRasterizer>) -> WidgetRenderer {
    let renderer =
        TextBitmapRenderer::new(RenderConfig::default(), rasterizer).expect("default config is valid");
    WidgetRenderer::new(host, renderer, Arc::new(FixedClock("Friday".to_string())))
}

fn has_ink(image: &image::RgbaImage) -> bool {
    image.pixels().any(|pixel| pixel[3] > 0)
}

/// Rasterizer whose font lookups and line draws can be made to fail.
struct FlakyRasterizer {
    inner: HeadlessRasterizer,
    fail_lines: bool,
}

impl TextRasterizer for FlakyRasterizer {
    fn load_font(&self, resource: &str) -> PlatformResult<FontHandle> {
        Err(PlatformError::CallFailed(format!("typeface {resource} is corrupt")))
    }

    fn line_metrics(&self, font: &FontHandle, size: f32) -> LineMetrics {
        self.inner.line_metrics(font, size)
    }

    fn measure(&self, font: &FontHandle, size: f32, text: &str) -> f32 {
        self.inner.measure(font, size, text)
    }

    fn rasterize_line(
        &self,
        font: &FontHandle,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    ) -> PlatformResult<image::RgbaImage> {
        if self.fail_lines {
            return Err(PlatformError::CallFailed("canvas lost".to_string()));
        }
        self.inner.rasterize_line(font, size, color, text)
    }
}

#[test]
fn empty_store_renders_literal_fallbacks() {
    let host = Arc::new(RecordingWidgetHost::new(34));
    let widgets = widget_renderer(host.clone(), Arc::new(HeadlessRasterizer::default()));
    let store: HashMap<String, String> = HashMap::new();

    let report = widgets.on_update(&[7], &store);
    assert_eq!(report.updated, vec![7]);

    let views = host.views(7).expect("widget 7 updated");
    assert_eq!(views.layout, WIDGET_LAYOUT);
    assert_eq!(views.text_for(VIEW_TRANSLATION), Some(DEFAULT_TRANSLATION));
    assert_eq!(views.text_for(VIEW_PROGRESS), Some(DEFAULT_PROGRESS));
    assert_eq!(views.text_for(VIEW_DATE), Some("Friday"));
    assert!(has_ink(&views.image), "fallback arabic text must be drawn");

    let (direct, _) = widgets.build_views(&munajat_core::WidgetContent::from_store(&store, "Friday"));
    assert_eq!(direct.image, views.image);
    assert!(!DEFAULT_ARABIC_TEXT.is_empty());
}

#[test]
fn stored_fields_reach_every_instance() {
    let host = Arc::new(RecordingWidgetHost::new(34));
    let widgets = widget_renderer(host.clone(), Arc::new(HeadlessRasterizer::default()));
    let mut store = HashMap::new();
    store.insert(KEY_ARABIC_TEXT.to_string(), "رَبِّ زِدْنِي عِلْمًا".to_string());
    store.insert(KEY_TRANSLATION.to_string(), "My Lord, increase me in knowledge".to_string());
    store.insert(KEY_PROGRESS.to_string(), "Day 12".to_string());

    let report = widgets.on_update(&[1, 2, 3], &store);
    assert_eq!(report.updated, vec![1, 2, 3]);
    assert!(report.failed.is_empty());

    for id in [1, 2, 3] {
        let views = host.views(id).expect("instance updated");
        assert_eq!(views.text_for(VIEW_PROGRESS), Some("Day 12"));
        assert_eq!(
            views.text_for(VIEW_TRANSLATION),
            Some("My Lord, increase me in knowledge")
        );
        assert_eq!(views.click_targets, TAP_TARGETS.to_vec());
        assert_eq!(
            views.launch.pending_intent_flags,
            FLAG_UPDATE_CURRENT | FLAG_IMMUTABLE
        );
    }
}

#[test]
fn font_failure_still_produces_bitmap() {
    let host = Arc::new(RecordingWidgetHost::new(30));
    let rasterizer = Arc::new(FlakyRasterizer {
        inner: HeadlessRasterizer::default(),
        fail_lines: false,
    });
    let widgets = widget_renderer(host.clone(), rasterizer);

    let report = widgets.on_update(&[5], &HashMap::<String, String>::new());
    assert_eq!(report.updated, vec![5]);
    assert!(matches!(
        report.degradations.as_slice(),
        [RenderDegradation::FontFallback { resource, .. }] if resource == "arabic_font"
    ));

    let views = host.views(5).expect("widget updated despite font failure");
    assert_eq!(views.image.dimensions(), (1200, 600));
    assert!(has_ink(&views.image));
    assert_eq!(views.launch.pending_intent_flags, FLAG_UPDATE_CURRENT);
}

#[test]
fn line_failures_leave_blank_canvas_but_update_widget() {
    let host = Arc::new(RecordingWidgetHost::new(34));
    let rasterizer = Arc::new(FlakyRasterizer {
        inner: HeadlessRasterizer::default(),
        fail_lines: true,
    });
    let widgets = widget_renderer(host.clone(), rasterizer);

    let report = widgets.on_update(&[9], &HashMap::<String, String>::new());
    assert_eq!(report.updated, vec![9]);
    assert!(report
        .degradations
        .iter()
        .any(|d| matches!(d, RenderDegradation::LineSkipped { .. })));
    let views = host.views(9).expect("widget updated");
    assert!(!has_ink(&views.image));
}

#[test]
fn failing_instance_does_not_block_others() {
    let host = Arc::new(RecordingWidgetHost::new(34).failing_for(2));
    let widgets = widget_renderer(host.clone(), Arc::new(HeadlessRasterizer::default()));

    let report = widgets.on_update(&[1, 2, 3], &HashMap::<String, String>::new());
    assert_eq!(report.updated, vec![1, 3]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 2);
    assert_eq!(host.updated_ids(), vec![1, 3]);
}

#[test]
fn no_instances_is_a_no_op() {
    let host = Arc::new(RecordingWidgetHost::new(34));
    let widgets = widget_renderer(host.clone(), Arc::new(HeadlessRasterizer::default()));
    let report = widgets.on_update(&[], &HashMap::<String, String>::new());
    assert!(report.updated.is_empty());
    assert!(host.updated_ids().is_empty());
}
