use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for the whole process.
///
/// `RUST_LOG` wins when set; the fallback keeps the HTTP layers at info.
/// Output goes to stdout so container runtimes that hide stderr still show
/// the log stream. Safe to call more than once.
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}
