//! Logging setup.

/// Installs `env_logger` as the global logger.
///
/// Filtering follows the `RUST_LOG` environment variable. Calling this more
/// than once, or after another logger was installed, has no effect.
///
/// # Example
///
/// ```no_run
/// depthcloud::init_logging();
/// log::info!("capture host ready");
/// ```
pub fn init_logging() {
    let _ = env_logger::try_init();
}
