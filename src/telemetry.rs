use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "BATCHSTREAM_LOG";

/// Initialize tracing with the `BATCHSTREAM_LOG` environment variable.
///
/// Defaults to "warn" so that logs do not interleave with the demo output.
/// Logs go to stderr; stdout is reserved for reports.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
