use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "EXIF_STAMP_LOG";

/// `LEVEL message` lines without timestamps or targets. Logs go to stdout
/// unless stdout is reserved for machine-readable output.
pub fn init_logger(verbose: bool, to_stderr: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    if to_stderr {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.with_writer(std::io::stdout).init();
    }
}
