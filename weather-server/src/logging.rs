use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Logs go to stderr so `check` output on stdout stays machine-readable.
pub fn init_logger(verbose: bool) {
    let default_directives = if verbose {
        "weather_check_server=debug,weather_check_core=debug,tower_http=debug,info"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
