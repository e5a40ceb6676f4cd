//! FFI crate exposing Munajat bridges to Flutter and the Android runtime.

pub mod api;
mod pixels;
mod runtime;

#[cfg(target_os = "android")]
mod android;
