//! Structured logging using **tracing**.
//!
//! Log output goes to stderr so stdout stays clean for the report.

/// Initializes the global tracing subscriber.
///
/// Call once at the beginning of the process. `json` selects
/// machine-readable output; otherwise a compact human format is used.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=bindcov_core=debug`)
pub fn init_structured_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (e.g. by a host test harness).
    let _ = if json {
        builder
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .try_init()
    } else {
        builder.compact().try_init()
    };
}
