//! `WallpaperManager` capability.

use super::{bitmap, jni_call, with_env};
use image::RgbaImage;
use jni::objects::{JObject, JValue};
use munajat_core::{PlatformResult, WallpaperService};

/// `WallpaperManager.FLAG_LOCK`.
const FLAG_LOCK: i32 = 2;

/// Lock-screen wallpaper through `WallpaperManager.setBitmap`.
pub(crate) struct AndroidWallpaperService;

impl WallpaperService for AndroidWallpaperService {
    fn set_lock_screen_bitmap(&self, image: &RgbaImage) -> PlatformResult<()> {
        with_env(|env, context, _| {
            let manager = jni_call!(
                env,
                "WallpaperManager.getInstance",
                env.call_static_method(
                    "android/app/WallpaperManager",
                    "getInstance",
                    "(Landroid/content/Context;)Landroid/app/WallpaperManager;",
                    &[JValue::Object(context)],
                )
                .and_then(|value| value.l())
            )?;
            let java_bitmap = bitmap::to_java_bitmap(env, image)?;
            let no_crop = JObject::null();
            let applied = jni_call!(
                env,
                "WallpaperManager.setBitmap",
                env.call_method(
                    &manager,
                    "setBitmap",
                    "(Landroid/graphics/Bitmap;Landroid/graphics/Rect;ZI)I",
                    &[
                        JValue::Object(&java_bitmap),
                        JValue::Object(&no_crop),
                        JValue::Bool(1),
                        JValue::Int(FLAG_LOCK),
                    ],
                )
                .and_then(|value| value.i())
            );
            bitmap::recycle(env, &java_bitmap);
            let applied = applied?;
            log::debug!(
                "event=wallpaper_apply module=android status=ok wallpaper_id={}",
                applied
            );
            Ok(())
        })
    }
}
