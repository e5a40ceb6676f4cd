//! `Paint`/`Canvas` text rasterizer.
//!
//! Shaping and bidi come from the framework; line breaking stays in core.

use super::{bitmap, java_string, jni_call, resource_id, with_env};
use crate::pixels::argb_color_int;
use image::{Rgba, RgbaImage};
use jni::objects::{GlobalRef, JObject, JValue};
use jni::JNIEnv;
use munajat_core::{FontHandle, LineMetrics, PlatformError, PlatformResult, TextRasterizer};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// `Paint.ANTI_ALIAS_FLAG`.
const ANTI_ALIAS_FLAG: i32 = 1;
/// `Resources.getFont` arrived in API 26.
const SDK_RESOURCE_FONTS: u32 = 26;

#[derive(Default)]
pub(crate) struct AndroidTextRasterizer {
    typefaces: Mutex<HashMap<String, GlobalRef>>,
}

impl AndroidTextRasterizer {
    fn typeface(&self, font: &FontHandle) -> Option<GlobalRef> {
        match font {
            FontHandle::SystemDefault => None,
            FontHandle::Resource(name) => self
                .typefaces
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(name)
                .cloned(),
        }
    }

    fn paint<'local>(
        &self,
        env: &mut JNIEnv<'local>,
        font: &FontHandle,
        size: f32,
        color: Rgba<u8>,
    ) -> PlatformResult<JObject<'local>> {
        let paint = jni_call!(
            env,
            "Paint.<init>",
            env.new_object("android/graphics/Paint", "(I)V", &[JValue::Int(ANTI_ALIAS_FLAG)])
        )?;
        jni_call!(
            env,
            "Paint.setTextSize",
            env.call_method(&paint, "setTextSize", "(F)V", &[JValue::Float(size)])
        )?;
        jni_call!(
            env,
            "Paint.setColor",
            env.call_method(&paint, "setColor", "(I)V", &[JValue::Int(argb_color_int(color))])
        )?;
        if let Some(typeface) = self.typeface(font) {
            jni_call!(
                env,
                "Paint.setTypeface",
                env.call_method(
                    &paint,
                    "setTypeface",
                    "(Landroid/graphics/Typeface;)Landroid/graphics/Typeface;",
                    &[JValue::Object(typeface.as_obj())],
                )
            )?;
        }
        Ok(paint)
    }

    fn try_line_metrics(&self, font: &FontHandle, size: f32) -> PlatformResult<LineMetrics> {
        with_env(|env, _, _| {
            let paint = self.paint(env, font, size, Rgba([0, 0, 0, 255]))?;
            let metrics = jni_call!(
                env,
                "Paint.getFontMetrics",
                env.call_method(
                    &paint,
                    "getFontMetrics",
                    "()Landroid/graphics/Paint$FontMetrics;",
                    &[],
                )
                .and_then(|value| value.l())
            )?;
            let ascent = jni_call!(
                env,
                "FontMetrics.ascent",
                env.get_field(&metrics, "ascent", "F").and_then(|value| value.f())
            )?;
            let descent = jni_call!(
                env,
                "FontMetrics.descent",
                env.get_field(&metrics, "descent", "F").and_then(|value| value.f())
            )?;
            Ok(LineMetrics {
                ascent: -ascent,
                descent,
            })
        })
    }

    fn try_measure(&self, font: &FontHandle, size: f32, text: &str) -> PlatformResult<f32> {
        with_env(|env, _, _| {
            let paint = self.paint(env, font, size, Rgba([0, 0, 0, 255]))?;
            let j_text = java_string(env, text)?;
            jni_call!(
                env,
                "Paint.measureText",
                env.call_method(
                    &paint,
                    "measureText",
                    "(Ljava/lang/String;)F",
                    &[JValue::Object(&j_text)],
                )
                .and_then(|value| value.f())
            )
        })
    }
}

/// Metrics used when the framework cannot be reached.
fn estimated_metrics(size: f32) -> LineMetrics {
    LineMetrics {
        ascent: size,
        descent: size * 0.25,
    }
}

impl TextRasterizer for AndroidTextRasterizer {
    fn load_font(&self, resource: &str) -> PlatformResult<FontHandle> {
        if let Some(handle) = self
            .typefaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resource)
            .map(|_| FontHandle::Resource(resource.to_string()))
        {
            return Ok(handle);
        }

        let typeface = with_env(|env, context, android| {
            if android.sdk_int < SDK_RESOURCE_FONTS {
                return Err(PlatformError::Unavailable(format!(
                    "resource fonts need API {SDK_RESOURCE_FONTS}, have {}",
                    android.sdk_int
                )));
            }
            let id = resource_id(env, context, &android.package_name, "font", resource)?;
            let resources = jni_call!(
                env,
                "Context.getResources",
                env.call_method(context, "getResources", "()Landroid/content/res/Resources;", &[])
                    .and_then(|value| value.l())
            )?;
            let typeface = jni_call!(
                env,
                "Resources.getFont",
                env.call_method(
                    &resources,
                    "getFont",
                    "(I)Landroid/graphics/Typeface;",
                    &[JValue::Int(id)],
                )
                .and_then(|value| value.l())
            )?;
            jni_call!(env, "new_global_ref", env.new_global_ref(&typeface))
        })?;

        self.typefaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource.to_string(), typeface);
        Ok(FontHandle::Resource(resource.to_string()))
    }

    fn line_metrics(&self, font: &FontHandle, size: f32) -> LineMetrics {
        self.try_line_metrics(font, size).unwrap_or_else(|err| {
            log::warn!("event=font_metrics module=android status=fallback error={}", err);
            estimated_metrics(size)
        })
    }

    fn measure(&self, font: &FontHandle, size: f32, text: &str) -> f32 {
        self.try_measure(font, size, text).unwrap_or_else(|err| {
            log::warn!("event=text_measure module=android status=fallback error={}", err);
            size * 0.5 * text.chars().count() as f32
        })
    }

    fn rasterize_line(
        &self,
        font: &FontHandle,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    ) -> PlatformResult<RgbaImage> {
        let metrics = self.try_line_metrics(font, size)?;
        let width = self.try_measure(font, size, text)?.ceil().max(1.0) as u32;
        let height = metrics.height().ceil().max(1.0) as u32;

        with_env(|env, _, _| {
            let paint = self.paint(env, font, size, color)?;
            let java_bitmap = bitmap::create_bitmap(env, width, height)?;
            let drawn = draw_line(env, &java_bitmap, &paint, text, metrics.ascent)
                .and_then(|()| bitmap::from_java_bitmap(env, &java_bitmap, width, height));
            bitmap::recycle(env, &java_bitmap);
            drawn
        })
    }
}

fn draw_line(
    env: &mut JNIEnv,
    java_bitmap: &JObject,
    paint: &JObject,
    text: &str,
    baseline: f32,
) -> PlatformResult<()> {
    let canvas = jni_call!(
        env,
        "Canvas.<init>",
        env.new_object(
            "android/graphics/Canvas",
            "(Landroid/graphics/Bitmap;)V",
            &[JValue::Object(java_bitmap)],
        )
    )?;
    let j_text = java_string(env, text)?;
    jni_call!(
        env,
        "Canvas.drawText",
        env.call_method(
            &canvas,
            "drawText",
            "(Ljava/lang/String;FFLandroid/graphics/Paint;)V",
            &[
                JValue::Object(&j_text),
                JValue::Float(0.0),
                JValue::Float(baseline),
                JValue::Object(paint),
            ],
        )
    )?;
    Ok(())
}
