//! Logger initialisation for the binary and tests.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are printed, including per-lane
/// spawn and eviction traces. Otherwise only info level and above are shown.
/// `RUST_LOG` still overrides either default.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_with_filter(&level.to_string());
}

/// Initializes the global logger with an explicit default filter such as
/// `"lanehop=debug,info"`.
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
pub fn init_with_filter(default_filter: &str) {
    let env = Env::default().default_filter_or(default_filter);
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails when a logger is already installed, e.g. by an earlier test.
    if let Err(e) = builder.try_init() {
        debug!("keeping existing logger: {e}");
    }
}
