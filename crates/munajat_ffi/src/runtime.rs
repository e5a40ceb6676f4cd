//! Process-wide bridge assembly.
//!
//! # Invariants
//! - Bridges are assembled at most once per process; a failed attempt is
//!   retried on the next call.
//! - An unusable config file is logged and replaced by defaults.

use munajat_core::{BridgeConfig, Bridges, Capabilities};
use once_cell::sync::OnceCell;

static BRIDGES: OnceCell<Bridges> = OnceCell::new();

/// Returns the shared bridges, assembling them on first use.
pub(crate) fn bridges() -> Result<&'static Bridges, String> {
    BRIDGES.get_or_try_init(|| {
        let config = load_config();
        let capabilities = capabilities()?;
        let bridges = Bridges::assemble(&capabilities, &config)
            .map_err(|err| format!("bridge assembly failed: {err}"))?;
        log::info!(
            "event=bridges_assemble module=ffi status=ok channels={}",
            bridges.channels.len()
        );
        Ok(bridges)
    })
}

fn load_config() -> BridgeConfig {
    BridgeConfig::from_env().unwrap_or_else(|err| {
        log::error!(
            "event=config_load module=ffi status=error fallback=defaults error={}",
            err
        );
        BridgeConfig::default()
    })
}

#[cfg(target_os = "android")]
fn capabilities() -> Result<Capabilities, String> {
    crate::android::capabilities().map_err(|err| err.to_string())
}

#[cfg(not(target_os = "android"))]
fn capabilities() -> Result<Capabilities, String> {
    Ok(Capabilities::in_memory())
}
