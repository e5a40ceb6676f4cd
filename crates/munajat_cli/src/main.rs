//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `munajat_core` linkage and print the registered channels.
//! - Optionally write a widget text preview: `munajat_cli preview <out.png> [text]`.

use munajat_core::model::widget::DEFAULT_ARABIC_TEXT;
use munajat_core::{
    BridgeConfig, Bridges, Capabilities, HeadlessRasterizer, RenderConfig, TextBitmapRenderer,
};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    println!("munajat_core ping={}", munajat_core::ping());
    println!("munajat_core version={}", munajat_core::core_version());

    let bridges = match Bridges::assemble(&Capabilities::in_memory(), &BridgeConfig::default()) {
        Ok(bridges) => bridges,
        Err(err) => {
            eprintln!("bridge assembly failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("channels={}", bridges.channels.channel_names().join(","));

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() != Some("preview") {
        return ExitCode::SUCCESS;
    }
    let Some(out) = args.next() else {
        eprintln!("usage: munajat_cli preview <out.png> [text]");
        return ExitCode::FAILURE;
    };
    let text = args.next().unwrap_or_else(|| DEFAULT_ARABIC_TEXT.to_string());
    match write_preview(&out, &text) {
        Ok(()) => {
            println!("preview={out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("preview failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn write_preview(out: &str, text: &str) -> Result<(), String> {
    let renderer = TextBitmapRenderer::new(
        RenderConfig::default(),
        Arc::new(HeadlessRasterizer::default()),
    )
    .map_err(|err| err.to_string())?;
    let outcome = renderer.render(text);
    for degradation in &outcome.degradations {
        println!("degradation={degradation:?}");
    }
    outcome.bitmap.save(out).map_err(|err| err.to_string())
}
