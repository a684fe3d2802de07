use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable holding the log filter (`error`, `warn`, `info`, `debug`, ...).
pub const LOG_ENV: &str = "VERIFY_SCHEDULE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr logger. `verbose` forces `debug` regardless of `VERIFY_SCHEDULE_LOG`.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER));
    builder.format_timestamp(None);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}
