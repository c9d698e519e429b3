use tracing_subscriber::EnvFilter;

/// Log to stderr, leaving stdout for the run reports.
///
/// `RUST_LOG` wins over `--verbose` when set.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
