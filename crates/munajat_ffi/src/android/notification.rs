//! `NotificationManager` capability over the framework `Notification.Builder`.

use super::{java_string, jni_call, resource_id, with_env};
use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use munajat_core::model::notification::{ChannelSpec, NotificationSpec};
use munajat_core::{NotificationService, PlatformResult};

/// First API level with notification channels.
const SDK_NOTIFICATION_CHANNELS: u32 = 26;
const BUILDER_CLASS: &str = "android/app/Notification$Builder";
const BUILDER_SIG: &str = "Landroid/app/Notification$Builder;";

pub(crate) struct AndroidNotificationService;

impl NotificationService for AndroidNotificationService {
    fn supports_channels(&self) -> bool {
        with_env(|_, _, android| Ok(android.sdk_int >= SDK_NOTIFICATION_CHANNELS)).unwrap_or(false)
    }

    fn create_channel(&self, channel: &ChannelSpec) -> PlatformResult<()> {
        with_env(|env, context, _| {
            let j_id = java_string(env, channel.id)?;
            let j_name = java_string(env, channel.name)?;
            let j_description = java_string(env, channel.description)?;
            let j_channel = jni_call!(
                env,
                "NotificationChannel.<init>",
                env.new_object(
                    "android/app/NotificationChannel",
                    "(Ljava/lang/String;Ljava/lang/CharSequence;I)V",
                    &[
                        JValue::Object(&j_id),
                        JValue::Object(&j_name),
                        JValue::Int(channel.importance.android_value()),
                    ],
                )
            )?;
            jni_call!(
                env,
                "NotificationChannel.setDescription",
                env.call_method(
                    &j_channel,
                    "setDescription",
                    "(Ljava/lang/String;)V",
                    &[JValue::Object(&j_description)],
                )
            )?;
            jni_call!(
                env,
                "NotificationChannel.setShowBadge",
                env.call_method(
                    &j_channel,
                    "setShowBadge",
                    "(Z)V",
                    &[JValue::Bool(u8::from(channel.show_badge))],
                )
            )?;
            jni_call!(
                env,
                "NotificationChannel.setLockscreenVisibility",
                env.call_method(
                    &j_channel,
                    "setLockscreenVisibility",
                    "(I)V",
                    &[JValue::Int(channel.lockscreen_visibility.android_value())],
                )
            )?;

            let manager = notification_manager(env, context)?;
            jni_call!(
                env,
                "NotificationManager.createNotificationChannel",
                env.call_method(
                    &manager,
                    "createNotificationChannel",
                    "(Landroid/app/NotificationChannel;)V",
                    &[JValue::Object(&j_channel)],
                )
            )?;
            Ok(())
        })
    }

    fn notify(&self, id: i32, notification: &NotificationSpec) -> PlatformResult<()> {
        with_env(|env, context, android| {
            let builder = if android.sdk_int >= SDK_NOTIFICATION_CHANNELS {
                let j_channel = java_string(env, notification.channel_id)?;
                jni_call!(
                    env,
                    "Notification.Builder.<init>",
                    env.new_object(
                        BUILDER_CLASS,
                        "(Landroid/content/Context;Ljava/lang/String;)V",
                        &[JValue::Object(context), JValue::Object(&j_channel)],
                    )
                )?
            } else {
                jni_call!(
                    env,
                    "Notification.Builder.<init>",
                    env.new_object(
                        BUILDER_CLASS,
                        "(Landroid/content/Context;)V",
                        &[JValue::Object(context)],
                    )
                )?
            };

            let icon = resource_id(
                env,
                context,
                &android.package_name,
                "mipmap",
                notification.small_icon,
            )?;
            let style = big_text_style(env, notification)?;
            let title = java_string(env, notification.title)?;
            let text = java_string(env, &notification.text)?;

            set_builder(env, &builder, "setSmallIcon", "(I)", JValue::Int(icon))?;
            set_builder(
                env,
                &builder,
                "setContentTitle",
                "(Ljava/lang/CharSequence;)",
                JValue::Object(&title),
            )?;
            set_builder(
                env,
                &builder,
                "setContentText",
                "(Ljava/lang/CharSequence;)",
                JValue::Object(&text),
            )?;
            set_builder(
                env,
                &builder,
                "setStyle",
                "(Landroid/app/Notification$Style;)",
                JValue::Object(&style),
            )?;
            set_builder(
                env,
                &builder,
                "setOngoing",
                "(Z)",
                JValue::Bool(u8::from(notification.ongoing)),
            )?;
            set_builder(
                env,
                &builder,
                "setAutoCancel",
                "(Z)",
                JValue::Bool(u8::from(notification.auto_cancel)),
            )?;
            set_builder(
                env,
                &builder,
                "setVisibility",
                "(I)",
                JValue::Int(notification.visibility.android_value()),
            )?;
            set_builder(
                env,
                &builder,
                "setPriority",
                "(I)",
                JValue::Int(notification.priority.android_value()),
            )?;
            let category = java_string(env, notification.category)?;
            set_builder(
                env,
                &builder,
                "setCategory",
                "(Ljava/lang/String;)",
                JValue::Object(&category),
            )?;

            let built = jni_call!(
                env,
                "Notification.Builder.build",
                env.call_method(&builder, "build", "()Landroid/app/Notification;", &[])
                    .and_then(|value| value.l())
            )?;
            let manager = notification_manager(env, context)?;
            jni_call!(
                env,
                "NotificationManager.notify",
                env.call_method(
                    &manager,
                    "notify",
                    "(ILandroid/app/Notification;)V",
                    &[JValue::Int(id), JValue::Object(&built)],
                )
            )?;
            Ok(())
        })
    }
}

fn notification_manager<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject,
) -> PlatformResult<JObject<'local>> {
    super::system_service(env, context, "notification")
}

/// Calls one fluent `Notification.Builder` setter taking a single argument.
fn set_builder(
    env: &mut JNIEnv,
    builder: &JObject,
    name: &str,
    params: &str,
    arg: JValue,
) -> PlatformResult<()> {
    let sig = format!("{params}{BUILDER_SIG}");
    jni_call!(env, name, env.call_method(builder, name, &sig, &[arg]))?;
    Ok(())
}

fn big_text_style<'local>(
    env: &mut JNIEnv<'local>,
    notification: &NotificationSpec,
) -> PlatformResult<JObject<'local>> {
    let style = jni_call!(
        env,
        "BigTextStyle.<init>",
        env.new_object("android/app/Notification$BigTextStyle", "()V", &[])
    )?;
    let big_text = java_string(env, &notification.big_text)?;
    let big_title = java_string(env, notification.big_title)?;
    let summary = java_string(env, notification.summary)?;
    for (method, value) in [
        ("bigText", &big_text),
        ("setBigContentTitle", &big_title),
        ("setSummaryText", &summary),
    ] {
        jni_call!(
            env,
            method,
            env.call_method(
                &style,
                method,
                "(Ljava/lang/CharSequence;)Landroid/app/Notification$BigTextStyle;",
                &[JValue::Object(value)],
            )
        )?;
    }
    Ok(style)
}
