//! Locale-aware weekday names via `SimpleDateFormat`.

use super::{java_string, jni_call, with_env};
use jni::objects::{JString, JValue};
use munajat_core::{day_name_or_system, Clock, PlatformResult};

/// `Clock` that formats `EEEE` in the device's default locale.
pub(crate) struct AndroidClock;

impl Clock for AndroidClock {
    fn day_name(&self) -> String {
        day_name_or_system(localized_day_name())
    }
}

fn localized_day_name() -> PlatformResult<String> {
    with_env(|env, _, _| {
        let locale = jni_call!(
            env,
            "Locale.getDefault",
            env.call_static_method("java/util/Locale", "getDefault", "()Ljava/util/Locale;", &[])
                .and_then(|value| value.l())
        )?;
        let pattern = java_string(env, "EEEE")?;
        let format = jni_call!(
            env,
            "SimpleDateFormat.<init>",
            env.new_object(
                "java/text/SimpleDateFormat",
                "(Ljava/lang/String;Ljava/util/Locale;)V",
                &[JValue::Object(&pattern), JValue::Object(&locale)],
            )
        )?;
        let now = jni_call!(env, "Date.<init>", env.new_object("java/util/Date", "()V", &[]))?;
        let name = jni_call!(
            env,
            "DateFormat.format",
            env.call_method(
                &format,
                "format",
                "(Ljava/util/Date;)Ljava/lang/String;",
                &[JValue::Object(&now)],
            )
            .and_then(|value| value.l())
        )?;
        let name = JString::from(name);
        jni_call!(env, "get_string", env.get_string(&name).map(String::from))
    })
}
