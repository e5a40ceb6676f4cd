//! Wallpaper request model.

use std::path::{Path, PathBuf};

/// One `setWallpaper` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRequest {
    /// Image file path. `None` when the caller omitted the argument.
    pub path: Option<PathBuf>,
}

impl WallpaperRequest {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Builds a request from a raw channel argument.
    pub fn from_argument(path: Option<&str>) -> Self {
        Self::new(path.map(PathBuf::from))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
