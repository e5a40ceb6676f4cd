//! `AppWidgetManager` capability over `RemoteViews`.

use super::{bitmap, java_string, jni_call, resource_id, with_env, AndroidContext};
use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use munajat_core::model::widget::LaunchAction;
use munajat_core::{PlatformError, PlatformResult, WidgetHost, WidgetViews};

pub(crate) struct AndroidWidgetHost;

impl WidgetHost for AndroidWidgetHost {
    fn sdk_int(&self) -> u32 {
        with_env(|_, _, android| Ok(android.sdk_int)).unwrap_or(0)
    }

    fn update_widget(&self, widget_id: i32, views: &WidgetViews) -> PlatformResult<()> {
        with_env(|env, context, android| {
            let package = java_string(env, &android.package_name)?;
            let layout = resource_id(env, context, &android.package_name, "layout", views.layout)?;
            let remote = jni_call!(
                env,
                "RemoteViews.<init>",
                env.new_object(
                    "android/widget/RemoteViews",
                    "(Ljava/lang/String;I)V",
                    &[JValue::Object(&package), JValue::Int(layout)],
                )
            )?;

            let image_id = view_id(env, context, android, views.image_view_id)?;
            let java_bitmap = bitmap::to_java_bitmap(env, &views.image)?;
            jni_call!(
                env,
                "RemoteViews.setImageViewBitmap",
                env.call_method(
                    &remote,
                    "setImageViewBitmap",
                    "(ILandroid/graphics/Bitmap;)V",
                    &[JValue::Int(image_id), JValue::Object(&java_bitmap)],
                )
            )?;

            for binding in &views.texts {
                let id = view_id(env, context, android, binding.view_id)?;
                let text = java_string(env, &binding.text)?;
                jni_call!(
                    env,
                    "RemoteViews.setTextViewText",
                    env.call_method(
                        &remote,
                        "setTextViewText",
                        "(ILjava/lang/CharSequence;)V",
                        &[JValue::Int(id), JValue::Object(&text)],
                    )
                )?;
            }

            let pending = launch_pending_intent(env, context, android, &views.launch)?;
            for target in &views.click_targets {
                let id = view_id(env, context, android, target)?;
                jni_call!(
                    env,
                    "RemoteViews.setOnClickPendingIntent",
                    env.call_method(
                        &remote,
                        "setOnClickPendingIntent",
                        "(ILandroid/app/PendingIntent;)V",
                        &[JValue::Int(id), JValue::Object(&pending)],
                    )
                )?;
            }

            let manager = jni_call!(
                env,
                "AppWidgetManager.getInstance",
                env.call_static_method(
                    "android/appwidget/AppWidgetManager",
                    "getInstance",
                    "(Landroid/content/Context;)Landroid/appwidget/AppWidgetManager;",
                    &[JValue::Object(context)],
                )
                .and_then(|value| value.l())
            )?;
            jni_call!(
                env,
                "AppWidgetManager.updateAppWidget",
                env.call_method(
                    &manager,
                    "updateAppWidget",
                    "(ILandroid/widget/RemoteViews;)V",
                    &[JValue::Int(widget_id), JValue::Object(&remote)],
                )
            )?;
            Ok(())
        })
    }
}

fn view_id(
    env: &mut JNIEnv,
    context: &JObject,
    android: &AndroidContext,
    name: &str,
) -> PlatformResult<i32> {
    resource_id(env, context, &android.package_name, "id", name)
}

/// Pending intent that reopens the host's launcher activity.
fn launch_pending_intent<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject,
    android: &AndroidContext,
    launch: &LaunchAction,
) -> PlatformResult<JObject<'local>> {
    let package_manager = jni_call!(
        env,
        "Context.getPackageManager",
        env.call_method(
            context,
            "getPackageManager",
            "()Landroid/content/pm/PackageManager;",
            &[],
        )
        .and_then(|value| value.l())
    )?;
    let package = java_string(env, &android.package_name)?;
    let intent = jni_call!(
        env,
        "PackageManager.getLaunchIntentForPackage",
        env.call_method(
            &package_manager,
            "getLaunchIntentForPackage",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&package)],
        )
        .and_then(|value| value.l())
    )?;
    if intent.is_null() {
        return Err(PlatformError::ResourceNotFound(format!(
            "launch intent for {}",
            android.package_name
        )));
    }
    jni_call!(
        env,
        "Intent.setFlags",
        env.call_method(
            &intent,
            "setFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(launch.intent_flags)],
        )
    )?;
    jni_call!(
        env,
        "PendingIntent.getActivity",
        env.call_static_method(
            "android/app/PendingIntent",
            "getActivity",
            "(Landroid/content/Context;ILandroid/content/Intent;I)Landroid/app/PendingIntent;",
            &[
                JValue::Object(context),
                JValue::Int(launch.request_code),
                JValue::Object(&intent),
                JValue::Int(launch.pending_intent_flags),
            ],
        )
        .and_then(|value| value.l())
    )
}
