//! Command/response channel between the host application and the bridges.
//!
//! # Responsibility
//! - Model method calls and their three result shapes.
//! - Route calls by channel name to the handler that owns the channel.
//!
//! # Invariants
//! - One handler per channel name; duplicates are rejected.
//! - Unknown methods on a known channel answer `NotImplemented`, never an error.

mod handlers;

pub use handlers::{
    LockScreenChannel, WallpaperChannel, LOCK_SCREEN_CHANNEL, METHOD_INITIALIZE_LOCK_SCREEN,
    METHOD_SET_WALLPAPER, METHOD_SHOW_LOCK_SCREEN_DUA, WALLPAPER_CHANNEL,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// One incoming method invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    /// Argument map (or `null` when the caller sent none).
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Returns a string argument; `None` when absent, null or not a string.
    pub fn argument_str(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(Value::as_str)
    }
}

/// Reply to one method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResult {
    Success {
        value: Value,
    },
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
    NotImplemented,
}

impl MethodResult {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Handler bound to one named channel.
pub trait MethodCallHandler: Send + Sync {
    fn channel_name(&self) -> &'static str;
    fn on_method_call(&self, call: &MethodCall) -> MethodResult;
}

/// Channel routing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    InvalidChannelName(String),
    DuplicateChannel(String),
    ChannelNotFound(String),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChannelName(value) => write!(f, "channel name is invalid: {value}"),
            Self::DuplicateChannel(value) => write!(f, "channel already registered: {value}"),
            Self::ChannelNotFound(value) => write!(f, "no handler registered for channel: {value}"),
        }
    }
}

impl Error for DispatchError {}

/// In-process channel registry.
#[derive(Default)]
pub struct MethodChannelRegistry {
    handlers: BTreeMap<String, Arc<dyn MethodCallHandler>>,
}

impl MethodChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one handler under its channel name.
    pub fn register(&mut self, handler: Arc<dyn MethodCallHandler>) -> Result<(), DispatchError> {
        let name = handler.channel_name().trim().to_string();
        if !is_valid_channel_name(&name) {
            return Err(DispatchError::InvalidChannelName(name));
        }
        if self.handlers.contains_key(name.as_str()) {
            return Err(DispatchError::DuplicateChannel(name));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns sorted channel names.
    pub fn channel_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Routes `call` to the handler registered for `channel`.
    pub fn dispatch(&self, channel: &str, call: &MethodCall) -> Result<MethodResult, DispatchError> {
        let handler = self
            .handlers
            .get(channel.trim())
            .ok_or_else(|| DispatchError::ChannelNotFound(channel.trim().to_string()))?;
        Ok(handler.on_method_call(call))
    }
}

fn is_valid_channel_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '/' | '-'))
}

#[cfg(test)]
mod tests {
    use super::{DispatchError, MethodCall, MethodCallHandler, MethodChannelRegistry, MethodResult};
    use serde_json::json;
    use std::sync::Arc;

    struct Echo(&'static str);

    impl MethodCallHandler for Echo {
        fn channel_name(&self) -> &'static str {
            self.0
        }

        fn on_method_call(&self, call: &MethodCall) -> MethodResult {
            MethodResult::success(call.method.clone())
        }
    }

    #[test]
    fn dispatches_by_channel_name() {
        let mut registry = MethodChannelRegistry::new();
        registry.register(Arc::new(Echo("test.echo"))).expect("register");
        let result = registry
            .dispatch("test.echo", &MethodCall::new("ping", json!(null)))
            .expect("dispatch");
        assert_eq!(result, MethodResult::success("ping"));
    }

    #[test]
    fn rejects_duplicate_and_invalid_channels() {
        let mut registry = MethodChannelRegistry::new();
        registry.register(Arc::new(Echo("test.echo"))).expect("register");
        let err = registry
            .register(Arc::new(Echo("test.echo")))
            .expect_err("duplicate must fail");
        assert_eq!(err, DispatchError::DuplicateChannel("test.echo".to_string()));

        let err = registry
            .register(Arc::new(Echo("bad channel")))
            .expect_err("whitespace must fail");
        assert!(matches!(err, DispatchError::InvalidChannelName(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_channel_is_reported() {
        let registry = MethodChannelRegistry::new();
        let err = registry
            .dispatch("missing", &MethodCall::new("ping", json!({})))
            .expect_err("no handler");
        assert_eq!(err, DispatchError::ChannelNotFound("missing".to_string()));
    }

    #[test]
    fn argument_str_ignores_non_strings() {
        let call = MethodCall::new("m", json!({"path": 3, "name": "x", "none": null}));
        assert_eq!(call.argument_str("name"), Some("x"));
        assert_eq!(call.argument_str("path"), None);
        assert_eq!(call.argument_str("none"), None);
        assert_eq!(call.argument_str("absent"), None);
    }

    #[test]
    fn result_serializes_with_status_tag() {
        let encoded = serde_json::to_value(MethodResult::error("E", "m")).expect("encode");
        assert_eq!(
            encoded,
            json!({"status": "error", "code": "E", "message": "m", "details": null})
        );
        let encoded = serde_json::to_value(MethodResult::NotImplemented).expect("encode");
        assert_eq!(encoded, json!({"status": "not_implemented"}));
    }
}
