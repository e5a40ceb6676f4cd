//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the widget, lock-screen and wallpaper bridges to Dart via FRB.
//! - Route typed calls through the same channel registry the host uses.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Wallpaper failures keep their `INVALID_ARGUMENT|BITMAP_ERROR|WALLPAPER_ERROR` code.

use crate::runtime;
use munajat_core::channel::{
    METHOD_INITIALIZE_LOCK_SCREEN, METHOD_SET_WALLPAPER, METHOD_SHOW_LOCK_SCREEN_DUA,
};
use munajat_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    MethodCall, MethodResult, LOCK_SCREEN_CHANNEL, WALLPAPER_CHANNEL,
};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Code returned when the bridges could not be assembled.
const CODE_UNAVAILABLE: &str = "UNAVAILABLE";
/// Code returned when the channel name has no handler.
const CODE_CHANNEL_NOT_FOUND: &str = "CHANNEL_NOT_FOUND";
/// Code returned when the argument document is not JSON.
const CODE_INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Outcome of a wallpaper change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperResponse {
    /// Whether the lock-screen wallpaper was replaced.
    pub ok: bool,
    /// Error tag when `ok` is false.
    pub code: Option<String>,
    /// Acknowledgment or human-readable failure.
    pub message: String,
}

/// Outcome of one widget update pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetUpdateResponse {
    pub updated: Vec<i32>,
    pub failed: Vec<i32>,
    /// Whether the text bitmap was rendered with any fallback.
    pub degraded: bool,
    pub message: String,
}

/// Creates the lock-screen notification channel.
///
/// # FFI contract
/// - Always acknowledges; channel failures are logged only.
#[flutter_rust_bridge::frb(sync)]
pub fn initialize_lock_screen() -> String {
    acknowledgment(call(
        LOCK_SCREEN_CHANNEL,
        MethodCall::new(METHOD_INITIALIZE_LOCK_SCREEN, Value::Null),
    ))
}

/// Posts (or replaces) the persistent lock-screen dua notification.
///
/// A missing `arabic_text` publishes an empty body.
#[flutter_rust_bridge::frb(sync)]
pub fn show_lock_screen_dua(arabic_text: Option<String>) -> String {
    acknowledgment(call(
        LOCK_SCREEN_CHANNEL,
        MethodCall::new(METHOD_SHOW_LOCK_SCREEN_DUA, json!({ "arabicText": arabic_text })),
    ))
}

/// Replaces the lock-screen wallpaper with the image at `path`.
#[flutter_rust_bridge::frb(sync)]
pub fn set_wallpaper(path: Option<String>) -> WallpaperResponse {
    match call(
        WALLPAPER_CHANNEL,
        MethodCall::new(METHOD_SET_WALLPAPER, json!({ "path": path })),
    ) {
        MethodResult::Success { value } => WallpaperResponse {
            ok: true,
            code: None,
            message: value_text(value),
        },
        MethodResult::Error { code, message, .. } => WallpaperResponse {
            ok: false,
            code: Some(code),
            message,
        },
        MethodResult::NotImplemented => WallpaperResponse {
            ok: false,
            code: None,
            message: "setWallpaper is not implemented".to_string(),
        },
    }
}

/// Renders the widget content from `fields` and updates `widget_ids`.
///
/// `fields` carries the widget store keys (`widget_arabic_text`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn update_home_widgets(
    widget_ids: Vec<i32>,
    fields: HashMap<String, String>,
) -> WidgetUpdateResponse {
    let bridges = match runtime::bridges() {
        Ok(bridges) => bridges,
        Err(err) => {
            return WidgetUpdateResponse {
                updated: Vec::new(),
                failed: widget_ids,
                degraded: false,
                message: format!("update_home_widgets failed: {err}"),
            };
        }
    };
    let report = bridges.widget.on_update(&widget_ids, &fields);
    let failed: Vec<i32> = report.failed.iter().map(|(id, _)| *id).collect();
    let message = if failed.is_empty() {
        format!("Updated {} widget(s).", report.updated.len())
    } else {
        format!(
            "Updated {} widget(s), {} failed.",
            report.updated.len(),
            failed.len()
        )
    };
    WidgetUpdateResponse {
        updated: report.updated,
        failed,
        degraded: !report.degradations.is_empty(),
        message,
    }
}

/// Generic method-channel entry point.
///
/// `arguments_json` is a JSON document (empty means no arguments). The reply
/// is a JSON-encoded result tagged by `status` (`success|error|not_implemented`).
#[flutter_rust_bridge::frb(sync)]
pub fn handle_method_call(channel: String, method: String, arguments_json: String) -> String {
    let arguments = if arguments_json.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(&arguments_json) {
            Ok(value) => value,
            Err(err) => {
                return encode(&MethodResult::error(
                    CODE_INVALID_ARGUMENTS,
                    format!("arguments are not valid JSON: {err}"),
                ))
            }
        }
    };
    encode(&call(&channel, MethodCall::new(method, arguments)))
}

fn call(channel: &str, method_call: MethodCall) -> MethodResult {
    let bridges = match runtime::bridges() {
        Ok(bridges) => bridges,
        Err(err) => return MethodResult::error(CODE_UNAVAILABLE, err),
    };
    match bridges.channels.dispatch(channel, &method_call) {
        Ok(result) => result,
        Err(err) => {
            log::warn!(
                "event=method_call module=ffi status=error channel={} error={}",
                channel,
                err
            );
            MethodResult::error(CODE_CHANNEL_NOT_FOUND, err.to_string())
        }
    }
}

fn acknowledgment(result: MethodResult) -> String {
    match result {
        MethodResult::Success { value } => value_text(value),
        MethodResult::Error { message, .. } => message,
        MethodResult::NotImplemented => "not implemented".to_string(),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn encode(result: &MethodResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|err| {
        format!(r#"{{"status":"error","code":"ENCODE_ERROR","message":"{err}","details":null}}"#)
    })
}
