//! Android capability implementations over JNI.
//!
//! # Responsibility
//! - Hold the application context registered by the host at startup.
//! - Implement the core capability traits with framework APIs only
//!   (no AndroidX), so lookups work from native threads.
//!
//! # Invariants
//! - Every JNI failure clears the pending Java exception before returning.
//! - No JNI entry point lets a panic cross into the JVM.

mod bitmap;
mod clock;
mod notification;
mod prefs;
mod text;
mod wallpaper;
mod widget;

pub use prefs::SharedPreferencesStore;

use jni::objects::{GlobalRef, JClass, JIntArray, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use munajat_core::{Capabilities, PlatformError, PlatformResult};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Preferences file written by the host's widget plugin.
const WIDGET_PREFERENCES: &str = "HomeWidgetPreferences";

/// Local reference slots reserved per `with_env` call.
const LOCAL_FRAME_CAPACITY: i32 = 32;

static ANDROID_CONTEXT: OnceCell<AndroidContext> = OnceCell::new();

/// Process-wide JVM handle plus the application context.
pub(crate) struct AndroidContext {
    vm: JavaVM,
    context: GlobalRef,
    package_name: String,
    sdk_int: u32,
}

/// Runs `f` with an attached JNI env and the application context.
pub(crate) fn with_env<T>(
    f: impl FnOnce(&mut JNIEnv, &JObject<'static>, &AndroidContext) -> PlatformResult<T>,
) -> PlatformResult<T> {
    let android = ANDROID_CONTEXT.get().ok_or_else(|| {
        PlatformError::Unavailable("android context has not been registered".to_string())
    })?;
    let mut guard = android
        .vm
        .attach_current_thread()
        .map_err(|err| PlatformError::Unavailable(format!("failed to attach thread: {err}")))?;
    // Locals are freed when the frame pops, even on threads the JVM already
    // attached (the widget callback).
    let framed = guard.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
        Ok::<_, jni::errors::Error>(f(env, android.context.as_obj(), android))
    });
    check(&mut guard, framed, "with_local_frame")?
}

/// Maps a JNI result, clearing any pending Java exception on failure.
pub(crate) fn check<T>(
    env: &mut JNIEnv,
    result: jni::errors::Result<T>,
    what: &str,
) -> PlatformResult<T> {
    result.map_err(|err| {
        if env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        PlatformError::CallFailed(format!("{what}: {err}"))
    })
}

/// Evaluates a JNI call and routes its error through `check`.
macro_rules! jni_call {
    ($env:ident, $what:expr, $call:expr) => {{
        let result = $call;
        $crate::android::check($env, result, $what)
    }};
}
pub(crate) use jni_call;

/// Creates a Java string as a plain object reference.
pub(crate) fn java_string<'local>(
    env: &mut JNIEnv<'local>,
    value: &str,
) -> PlatformResult<JObject<'local>> {
    let string = jni_call!(env, "new_string", env.new_string(value))?;
    Ok(JObject::from(string))
}

/// Resolves `R.<kind>.<name>` for the host package.
pub(crate) fn resource_id(
    env: &mut JNIEnv,
    context: &JObject,
    package_name: &str,
    kind: &str,
    name: &str,
) -> PlatformResult<i32> {
    let resources = jni_call!(
        env,
        "Context.getResources",
        env.call_method(context, "getResources", "()Landroid/content/res/Resources;", &[])
            .and_then(|value| value.l())
    )?;
    let j_name = java_string(env, name)?;
    let j_kind = java_string(env, kind)?;
    let j_package = java_string(env, package_name)?;
    let id = jni_call!(
        env,
        "Resources.getIdentifier",
        env.call_method(
            &resources,
            "getIdentifier",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)I",
            &[
                JValue::Object(&j_name),
                JValue::Object(&j_kind),
                JValue::Object(&j_package),
            ],
        )
        .and_then(|value| value.i())
    )?;
    if id == 0 {
        return Err(PlatformError::ResourceNotFound(format!("{kind}/{name}")));
    }
    Ok(id)
}

/// Looks up a system service by its `Context.*_SERVICE` name.
pub(crate) fn system_service<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject,
    name: &str,
) -> PlatformResult<JObject<'local>> {
    let j_name = java_string(env, name)?;
    let service = jni_call!(
        env,
        "Context.getSystemService",
        env.call_method(
            context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&j_name)],
        )
        .and_then(|value| value.l())
    )?;
    if service.is_null() {
        return Err(PlatformError::Unavailable(format!("system service `{name}`")));
    }
    Ok(service)
}

fn register_context(env: &mut JNIEnv, context: &JObject) -> PlatformResult<&'static AndroidContext> {
    ANDROID_CONTEXT.get_or_try_init(|| {
        let app_context = jni_call!(
            env,
            "Context.getApplicationContext",
            env.call_method(context, "getApplicationContext", "()Landroid/content/Context;", &[])
                .and_then(|value| value.l())
        )?;
        let package = jni_call!(
            env,
            "Context.getPackageName",
            env.call_method(&app_context, "getPackageName", "()Ljava/lang/String;", &[])
                .and_then(|value| value.l())
        )?;
        let package = JString::from(package);
        let package_name = jni_call!(
            env,
            "get_string",
            env.get_string(&package).map(String::from)
        )?;
        let sdk_int = jni_call!(
            env,
            "Build.VERSION.SDK_INT",
            env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
                .and_then(|value| value.i())
        )?;
        let vm = jni_call!(env, "get_java_vm", env.get_java_vm())?;
        let context = jni_call!(env, "new_global_ref", env.new_global_ref(&app_context))?;

        log::info!(
            "event=android_register module=ffi status=ok package={} sdk_int={}",
            package_name,
            sdk_int
        );
        Ok(AndroidContext {
            vm,
            context,
            package_name,
            sdk_int: u32::try_from(sdk_int).unwrap_or(0),
        })
    })
}

/// Capabilities backed by the registered Android context.
pub(crate) fn capabilities() -> PlatformResult<Capabilities> {
    if ANDROID_CONTEXT.get().is_none() {
        return Err(PlatformError::Unavailable(
            "android context has not been registered".to_string(),
        ));
    }
    Ok(Capabilities {
        widget_host: Arc::new(widget::AndroidWidgetHost),
        notifications: Arc::new(notification::AndroidNotificationService),
        wallpapers: Arc::new(wallpaper::AndroidWallpaperService),
        rasterizer: Arc::new(text::AndroidTextRasterizer::default()),
        clock: Arc::new(clock::AndroidClock),
    })
}

/// `MunajatNative.nativeInit(Context)`: registers the application context.
#[no_mangle]
pub extern "system" fn Java_com_example_munajat_1e_1maqbool_1app_MunajatNative_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
) {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        register_context(&mut env, &context).map(|_| ())
    }));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => log::error!(
            "event=android_register module=ffi status=error error={}",
            err
        ),
        Err(_) => log::error!("event=android_register module=ffi status=error error=panic"),
    }
}

/// `HomeWidgetGlanceReceiver.nativeOnUpdate(Context, int[])`: widget update callback.
#[no_mangle]
pub extern "system" fn Java_com_example_munajat_1e_1maqbool_1app_HomeWidgetGlanceReceiver_nativeOnUpdate(
    mut env: JNIEnv,
    _this: JObject,
    context: JObject,
    widget_ids: JIntArray,
) {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        on_widget_update(&mut env, &context, &widget_ids)
    }));
    match outcome {
        Ok(Ok(count)) => log::debug!(
            "event=widget_callback module=ffi status=ok updated={}",
            count
        ),
        Ok(Err(err)) => log::error!("event=widget_callback module=ffi status=error error={}", err),
        Err(_) => log::error!("event=widget_callback module=ffi status=error error=panic"),
    }
}

fn on_widget_update(env: &mut JNIEnv, context: &JObject, widget_ids: &JIntArray) -> PlatformResult<usize> {
    let android = register_context(env, context)?;
    let length = jni_call!(env, "get_array_length", env.get_array_length(widget_ids))?;
    let mut ids = vec![0_i32; usize::try_from(length).unwrap_or(0)];
    jni_call!(
        env,
        "get_int_array_region",
        env.get_int_array_region(widget_ids, 0, &mut ids)
    )?;

    let store = SharedPreferencesStore::open(env, android.context.as_obj(), WIDGET_PREFERENCES)?;
    let bridges = crate::runtime::bridges().map_err(PlatformError::Unavailable)?;
    let report = bridges.widget.on_update(&ids, &store);
    Ok(report.updated.len())
}
