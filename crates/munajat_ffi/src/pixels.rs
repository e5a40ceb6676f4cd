//! Straight/premultiplied alpha conversion for `ARGB_8888` bitmaps.
//!
//! `ARGB_8888` pixels sit in memory as premultiplied R, G, B, A bytes; `image`
//! buffers carry straight alpha.

#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use image::RgbaImage;

/// Copies `image` into premultiplied RGBA bytes.
pub(crate) fn to_premultiplied(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = image.as_raw().clone();
    for pixel in bytes.chunks_exact_mut(4) {
        let alpha = u16::from(pixel[3]);
        for channel in &mut pixel[..3] {
            *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
    bytes
}

/// Builds a straight-alpha image from premultiplied RGBA bytes.
///
/// Returns `None` when `bytes` does not hold exactly `width * height` pixels.
pub(crate) fn from_premultiplied(width: u32, height: u32, mut bytes: Vec<u8>) -> Option<RgbaImage> {
    for pixel in bytes.chunks_exact_mut(4) {
        let alpha = u16::from(pixel[3]);
        if alpha == 0 {
            pixel[..3].fill(0);
            continue;
        }
        for channel in &mut pixel[..3] {
            *channel = ((u16::from(*channel) * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
    RgbaImage::from_raw(width, height, bytes)
}

/// Packs straight RGBA into an Android `@ColorInt`.
pub(crate) fn argb_color_int(color: image::Rgba<u8>) -> i32 {
    let [r, g, b, a] = color.0;
    i32::from_be_bytes([a, r, g, b])
}
