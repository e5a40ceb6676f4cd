//! `image` buffers to and from `android.graphics.Bitmap`.

use super::jni_call;
use crate::pixels::{from_premultiplied, to_premultiplied};
use image::RgbaImage;
use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use munajat_core::{PlatformError, PlatformResult};

const BITMAP_CLASS: &str = "android/graphics/Bitmap";
const CONFIG_CLASS: &str = "android/graphics/Bitmap$Config";

/// Creates an empty `ARGB_8888` bitmap.
pub(super) fn create_bitmap<'local>(
    env: &mut JNIEnv<'local>,
    width: u32,
    height: u32,
) -> PlatformResult<JObject<'local>> {
    let config = jni_call!(
        env,
        "Bitmap.Config.ARGB_8888",
        env.get_static_field(CONFIG_CLASS, "ARGB_8888", "Landroid/graphics/Bitmap$Config;")
            .and_then(|value| value.l())
    )?;
    let width = i32::try_from(width)
        .map_err(|_| PlatformError::CallFailed(format!("bitmap width {width} too large")))?;
    let height = i32::try_from(height)
        .map_err(|_| PlatformError::CallFailed(format!("bitmap height {height} too large")))?;
    jni_call!(
        env,
        "Bitmap.createBitmap",
        env.call_static_method(
            BITMAP_CLASS,
            "createBitmap",
            "(IILandroid/graphics/Bitmap$Config;)Landroid/graphics/Bitmap;",
            &[JValue::Int(width), JValue::Int(height), JValue::Object(&config)],
        )
        .and_then(|value| value.l())
    )
}

/// Copies `image` into a new Java bitmap.
pub(super) fn to_java_bitmap<'local>(
    env: &mut JNIEnv<'local>,
    image: &RgbaImage,
) -> PlatformResult<JObject<'local>> {
    let bitmap = create_bitmap(env, image.width(), image.height())?;
    let mut pixels = to_premultiplied(image);
    match copy_into(env, &bitmap, &mut pixels) {
        Ok(()) => Ok(bitmap),
        Err(err) => {
            recycle(env, &bitmap);
            Err(err)
        }
    }
}

fn copy_into(env: &mut JNIEnv, bitmap: &JObject, pixels: &mut [u8]) -> PlatformResult<()> {
    // SAFETY: `pixels` outlives the buffer, which is only read by the
    // synchronous `copyPixelsFromBuffer` call below.
    let buffer = jni_call!(env, "new_direct_byte_buffer", unsafe {
        env.new_direct_byte_buffer(pixels.as_mut_ptr(), pixels.len())
    })?;
    jni_call!(
        env,
        "Bitmap.copyPixelsFromBuffer",
        env.call_method(
            bitmap,
            "copyPixelsFromBuffer",
            "(Ljava/nio/Buffer;)V",
            &[JValue::Object(&buffer)],
        )
    )?;
    Ok(())
}

/// Frees the native pixels of a bitmap that will not be handed on.
pub(super) fn recycle(env: &mut JNIEnv, bitmap: &JObject) {
    let _ = jni_call!(
        env,
        "Bitmap.recycle",
        env.call_method(bitmap, "recycle", "()V", &[])
    );
}

/// Reads a Java `ARGB_8888` bitmap back into an `image` buffer.
pub(super) fn from_java_bitmap(
    env: &mut JNIEnv,
    bitmap: &JObject,
    width: u32,
    height: u32,
) -> PlatformResult<RgbaImage> {
    let mut pixels = vec![0_u8; width as usize * height as usize * 4];
    // SAFETY: `pixels` outlives the buffer, which is only written by the
    // synchronous `copyPixelsToBuffer` call below.
    let buffer = jni_call!(env, "new_direct_byte_buffer", unsafe {
        env.new_direct_byte_buffer(pixels.as_mut_ptr(), pixels.len())
    })?;
    jni_call!(
        env,
        "Bitmap.copyPixelsToBuffer",
        env.call_method(
            bitmap,
            "copyPixelsToBuffer",
            "(Ljava/nio/Buffer;)V",
            &[JValue::Object(&buffer)],
        )
    )?;
    from_premultiplied(width, height, pixels)
        .ok_or_else(|| PlatformError::CallFailed("bitmap buffer size mismatch".to_string()))
}
