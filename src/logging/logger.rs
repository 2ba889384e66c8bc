// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Logger initialization and configuration

use crate::error::FilterError;
use crate::Result;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the log level for the verbosity flags
pub fn level_for(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initialize the logging system.
///
/// Logs go to stderr; stdout carries command results only.
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let filter = EnvFilter::new(level_for(verbose, quiet));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| FilterError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Run a future inside a named operation span
pub async fn with_async_operation_span<Fut>(operation: &str, fut: Fut) -> Fut::Output
where
    Fut: std::future::Future,
{
    let span = tracing::info_span!("operation", name = operation);
    fut.instrument(span).await
}
