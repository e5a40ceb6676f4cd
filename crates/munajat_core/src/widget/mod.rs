//! Home-screen widget update use-case.
//!
//! # Responsibility
//! - Turn stored widget fields into one view update per active instance.
//! - Attach the tap-to-launch action to every interactive region.
//!
//! # Invariants
//! - `on_update` never returns an error; per-instance failures are logged and
//!   reported, and the remaining instances are still updated.
//! - Missing store keys fall back to literal defaults.

use crate::model::widget::{LaunchAction, WidgetContent, WidgetViews};
use crate::platform::{Clock, KeyValueStore, PlatformError, WidgetHost};
use crate::render::{RenderDegradation, TextBitmapRenderer};
use log::{debug, error, info};
use std::sync::Arc;

/// Summary of one update pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetUpdateReport {
    pub updated: Vec<i32>,
    pub failed: Vec<(i32, PlatformError)>,
    pub degradations: Vec<RenderDegradation>,
}

/// Renders widget content and pushes it to the widget host.
pub struct WidgetRenderer {
    host: Arc<dyn WidgetHost>,
    renderer: TextBitmapRenderer,
    clock: Arc<dyn Clock>,
}

impl WidgetRenderer {
    pub fn new(host: Arc<dyn WidgetHost>, renderer: TextBitmapRenderer, clock: Arc<dyn Clock>) -> Self {
        Self {
            host,
            renderer,
            clock,
        }
    }

    /// Builds the views for `content` without touching the host.
    pub fn build_views(&self, content: &WidgetContent) -> (WidgetViews, Vec<RenderDegradation>) {
        let outcome = self.renderer.render(&content.arabic_text);
        let launch = LaunchAction::for_sdk(self.host.sdk_int());
        let views = WidgetViews::build(content, outcome.bitmap, launch);
        (views, outcome.degradations)
    }

    /// Handles the OS update callback for `widget_ids`.
    ///
    /// The bitmap is rendered once per pass and shared by every instance.
    pub fn on_update(&self, widget_ids: &[i32], store: &dyn KeyValueStore) -> WidgetUpdateReport {
        let mut report = WidgetUpdateReport::default();
        if widget_ids.is_empty() {
            debug!("event=widget_update module=widget status=skipped reason=no_instances");
            return report;
        }

        let content = WidgetContent::from_store(store, self.clock.day_name());
        let (views, degradations) = self.build_views(&content);
        report.degradations = degradations;

        for &widget_id in widget_ids {
            debug!("event=widget_update module=widget status=start widget_id={widget_id}");
            match self.host.update_widget(widget_id, &views) {
                Ok(()) => {
                    info!(
                        "event=widget_update module=widget status=ok widget_id={} text_chars={}",
                        widget_id,
                        content.arabic_text.chars().count()
                    );
                    report.updated.push(widget_id);
                }
                Err(err) => {
                    error!(
                        "event=widget_update module=widget status=error widget_id={} error={}",
                        widget_id, err
                    );
                    report.failed.push((widget_id, err));
                }
            }
        }
        report
    }
}
