//! Logging setup.
//!
//! Native builds log through `tracing-subscriber`. In the browser, `tracing`
//! events are forwarded to the `log` facade and printed by `console_log`.

/// Install the global subscriber. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("protana_site=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Route `tracing` output to the browser console.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub fn init() {
    console_error_panic_hook::set_once();

    let _ = console_log::init_with_level(log::Level::Info);
}
