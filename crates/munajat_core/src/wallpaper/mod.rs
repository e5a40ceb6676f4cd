//! Lock-screen wallpaper bridge.
//!
//! # Responsibility
//! - Validate the request, decode the image file and apply it to the lock screen.
//! - Report failures as tagged errors the caller can branch on.
//!
//! # Invariants
//! - A missing path is `InvalidArgument`; an unreadable or undecodable file is
//!   `Decode`; anything the OS rejects is `Apply`.
//! - No rollback and no retry.

use crate::model::wallpaper::WallpaperRequest;
use crate::platform::{PlatformError, WallpaperService};
use image::RgbaImage;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

/// Acknowledgment returned on success.
pub const WALLPAPER_SET_ACK: &str = "Wallpaper set successfully";

pub const CODE_INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const CODE_BITMAP_ERROR: &str = "BITMAP_ERROR";
pub const CODE_WALLPAPER_ERROR: &str = "WALLPAPER_ERROR";

/// Tagged wallpaper failure.
#[derive(Debug)]
pub enum WallpaperError {
    /// The path argument was not supplied.
    InvalidArgument,
    /// The file could not be read or decoded.
    Decode(DecodeFailure),
    /// The OS refused the bitmap.
    Apply(PlatformError),
}

/// Why an image could not be turned into a bitmap.
#[derive(Debug)]
pub enum DecodeFailure {
    Io(std::io::Error),
    Image(image::ImageError),
}

impl Display for DecodeFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Image(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DecodeFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Image(err) => Some(err),
        }
    }
}

impl WallpaperError {
    /// Stable error code for the channel caller.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument => CODE_INVALID_ARGUMENT,
            Self::Decode(_) => CODE_BITMAP_ERROR,
            Self::Apply(_) => CODE_WALLPAPER_ERROR,
        }
    }

    /// Human-readable message for the channel caller.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidArgument => "Image path is required".to_string(),
            Self::Decode(_) => "Failed to decode image".to_string(),
            Self::Apply(err) => format!("Failed to set wallpaper: {err}"),
        }
    }
}

impl Display for WallpaperError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl Error for WallpaperError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument => None,
            Self::Decode(err) => Some(err),
            Self::Apply(err) => Some(err),
        }
    }
}

/// Applies image files as the lock-screen wallpaper.
pub struct WallpaperBridge {
    wallpapers: Arc<dyn WallpaperService>,
}

impl WallpaperBridge {
    pub fn new(wallpapers: Arc<dyn WallpaperService>) -> Self {
        Self { wallpapers }
    }

    /// Handles one `setWallpaper` request.
    pub fn set_wallpaper(&self, request: &WallpaperRequest) -> Result<&'static str, WallpaperError> {
        let path = request.path().ok_or(WallpaperError::InvalidArgument)?;
        let bitmap = decode_image_file(path).map_err(|err| {
            error!(
                "event=wallpaper_decode module=wallpaper status=error error={}",
                err
            );
            WallpaperError::Decode(err)
        })?;
        let (width, height) = bitmap.dimensions();
        self.wallpapers.set_lock_screen_bitmap(&bitmap).map_err(|err| {
            error!(
                "event=wallpaper_apply module=wallpaper status=error error={}",
                err
            );
            WallpaperError::Apply(err)
        })?;
        info!(
            "event=wallpaper_apply module=wallpaper status=ok width={} height={}",
            width, height
        );
        Ok(WALLPAPER_SET_ACK)
    }
}

/// Reads and decodes an image file, sniffing the format from its contents.
pub fn decode_image_file(path: &Path) -> Result<RgbaImage, DecodeFailure> {
    let bytes = std::fs::read(path).map_err(DecodeFailure::Io)?;
    let decoded = image::load_from_memory(&bytes).map_err(DecodeFailure::Image)?;
    Ok(decoded.to_rgba8())
}
