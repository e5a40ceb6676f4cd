//! `SharedPreferences` read access.

use super::{check, java_string, jni_call, with_env};
use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::JNIEnv;
use munajat_core::{KeyValueStore, PlatformResult};

/// `Context.MODE_PRIVATE`.
const MODE_PRIVATE: i32 = 0;

/// String lookups against one preferences file.
pub struct SharedPreferencesStore {
    preferences: GlobalRef,
}

impl SharedPreferencesStore {
    /// Opens the preferences file `name` of `context`.
    pub(crate) fn open(env: &mut JNIEnv, context: &JObject, name: &str) -> PlatformResult<Self> {
        let j_name = java_string(env, name)?;
        let preferences = jni_call!(
            env,
            "Context.getSharedPreferences",
            env.call_method(
                context,
                "getSharedPreferences",
                "(Ljava/lang/String;I)Landroid/content/SharedPreferences;",
                &[JValue::Object(&j_name), JValue::Int(MODE_PRIVATE)],
            )
            .and_then(|value| value.l())
        )?;
        let preferences = jni_call!(env, "new_global_ref", env.new_global_ref(&preferences))?;
        Ok(Self { preferences })
    }

    fn lookup(&self, key: &str) -> PlatformResult<Option<String>> {
        with_env(|env, _, _| {
            let j_key = java_string(env, key)?;
            let fallback = JObject::null();
            let value = jni_call!(
                env,
                "SharedPreferences.getString",
                env.call_method(
                    self.preferences.as_obj(),
                    "getString",
                    "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
                    &[JValue::Object(&j_key), JValue::Object(&fallback)],
                )
                .and_then(|value| value.l())
            )?;
            if value.is_null() {
                return Ok(None);
            }
            let value = JString::from(value);
            let text = env.get_string(&value).map(String::from);
            check(env, text, "get_string").map(Some)
        })
    }
}

impl KeyValueStore for SharedPreferencesStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.lookup(key) {
            Ok(value) => value,
            Err(err) => {
                // Non-string values under the key throw ClassCastException.
                log::warn!(
                    "event=prefs_read module=android status=error key={} error={}",
                    key,
                    err
                );
                None
            }
        }
    }
}
