//! Logging setup.
//!
//! The library only emits through the `log` facade. Binaries call
//! [`init_logging`] once to install `env_logger`.

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,supergroup=debug,wgpu=warn,naga=warn";

/// Installs `env_logger`, honouring `RUST_LOG` and falling back to
/// [`DEFAULT_FILTER`]. Later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .try_init();
}

/// Test variant: output is captured by the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
