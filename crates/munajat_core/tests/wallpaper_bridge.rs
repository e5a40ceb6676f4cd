use image::{Rgba, RgbaImage};
use munajat_core::platform::memory::RecordingWallpaperService;
use munajat_core::wallpaper::{
    CODE_BITMAP_ERROR, CODE_INVALID_ARGUMENT, CODE_WALLPAPER_ERROR, WALLPAPER_SET_ACK,
};
use munajat_core::{WallpaperBridge, WallpaperError, WallpaperRequest};
use std::path::PathBuf;
use std::sync::Arc;

fn write_png(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let image = RgbaImage::from_pixel(4, 3, Rgba([0x1B, 0x5E, 0x20, 0xFF]));
    image.save(&path).expect("write png fixture");
    path
}

#[test]
fn missing_path_is_invalid_argument() {
    let service = Arc::new(RecordingWallpaperService::new());
    let bridge = WallpaperBridge::new(service.clone());

    let err = bridge
        .set_wallpaper(&WallpaperRequest::new(None))
        .expect_err("missing path must fail");
    assert!(matches!(err, WallpaperError::InvalidArgument));
    assert_eq!(err.code(), CODE_INVALID_ARGUMENT);
    assert_eq!(err.message(), "Image path is required");
    assert!(service.lock_screen().is_none());
}

#[test]
fn corrupt_file_is_bitmap_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("corrupt.png");
    std::fs::write(&path, b"definitely not a png").expect("write corrupt fixture");

    let service = Arc::new(RecordingWallpaperService::new());
    let bridge = WallpaperBridge::new(service.clone());
    let err = bridge
        .set_wallpaper(&WallpaperRequest::new(Some(path)))
        .expect_err("corrupt image must fail");
    assert_eq!(err.code(), CODE_BITMAP_ERROR);
    assert_eq!(err.message(), "Failed to decode image");
    assert!(service.lock_screen().is_none());
}

#[test]
fn unreadable_file_is_bitmap_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = Arc::new(RecordingWallpaperService::new());
    let bridge = WallpaperBridge::new(service);

    let err = bridge
        .set_wallpaper(&WallpaperRequest::new(Some(dir.path().join("absent.jpg"))))
        .expect_err("missing file must fail");
    assert_eq!(err.code(), CODE_BITMAP_ERROR);
}

#[test]
fn valid_image_updates_lock_screen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_png(&dir, "dua.png");

    let service = Arc::new(RecordingWallpaperService::new());
    let bridge = WallpaperBridge::new(service.clone());
    let ack = bridge
        .set_wallpaper(&WallpaperRequest::new(Some(path)))
        .expect("valid image applies");
    assert_eq!(ack, WALLPAPER_SET_ACK);

    let applied = service.lock_screen().expect("lock screen updated");
    assert_eq!(applied.dimensions(), (4, 3));
    assert_eq!(*applied.get_pixel(0, 0), Rgba([0x1B, 0x5E, 0x20, 0xFF]));
}

#[test]
fn format_is_sniffed_from_contents_not_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let png = write_png(&dir, "dua.png");
    let renamed = dir.path().join("dua.bin");
    std::fs::rename(&png, &renamed).expect("rename fixture");

    let service = Arc::new(RecordingWallpaperService::new());
    let bridge = WallpaperBridge::new(service.clone());
    bridge
        .set_wallpaper(&WallpaperRequest::new(Some(renamed)))
        .expect("content sniffing decodes png");
    assert!(service.lock_screen().is_some());
}

#[test]
fn gif_bmp_and_webp_images_apply() {
    let dir = tempfile::tempdir().expect("temp dir");
    let image = RgbaImage::from_pixel(2, 2, Rgba([0x1B, 0x5E, 0x20, 0xFF]));

    for name in ["dua.gif", "dua.bmp", "dua.webp"] {
        let path = dir.path().join(name);
        image.save(&path).expect("write fixture");

        let service = Arc::new(RecordingWallpaperService::new());
        let bridge = WallpaperBridge::new(service.clone());
        let ack = bridge
            .set_wallpaper(&WallpaperRequest::new(Some(path)))
            .unwrap_or_else(|err| panic!("{name} should decode: {err}"));
        assert_eq!(ack, WALLPAPER_SET_ACK);
        let applied = service.lock_screen().expect("lock screen updated");
        assert_eq!(applied.dimensions(), (2, 2), "{name}");
    }
}

#[test]
fn platform_rejection_is_wallpaper_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_png(&dir, "dua.png");

    let bridge = WallpaperBridge::new(Arc::new(RecordingWallpaperService::failing(
        "SET_WALLPAPER permission denied",
    )));
    let err = bridge
        .set_wallpaper(&WallpaperRequest::new(Some(path)))
        .expect_err("platform failure surfaces");
    assert_eq!(err.code(), CODE_WALLPAPER_ERROR);
    assert!(err.message().starts_with("Failed to set wallpaper: "));
    assert!(err.message().contains("SET_WALLPAPER permission denied"));
}
