use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr subscriber; `RUST_LOG` overrides the `--debug` default
pub(crate) fn init_logging(debug: bool) {
    let default_directive = if debug { "ytstats=debug" } else { "ytstats=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
