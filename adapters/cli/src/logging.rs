//! Process-wide logger setup.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global logger.
///
/// `RUST_LOG` takes precedence. Without it the filter defaults to `debug` when
/// `verbose` is set and `info` otherwise.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.to_string()));

    // A logger may already be installed when tests call this repeatedly.
    let _ = builder.try_init();
}
