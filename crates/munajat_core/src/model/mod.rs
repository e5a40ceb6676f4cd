//! Transient inputs and OS-facing descriptions built per call.
//!
//! # Responsibility
//! - Define what each bridge reads from its caller and hands to the OS.
//! - Hold the literal constants the host application relies on.
//!
//! # Invariants
//! - Nothing here outlives one invocation.
//! - The notification identity is fixed; see `notification::LOCK_SCREEN_NOTIFICATION_ID`.

pub mod notification;
pub mod wallpaper;
pub mod widget;
