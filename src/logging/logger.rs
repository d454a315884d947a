// file: src/logging/logger.rs
// version: 1.0.0
// guid: d7e1f5a8-3b6c-4e92-a0f4-d6e7f8a9b0c1

//! Logger initialization
//!
//! Diagnostics go to stderr. Stdout carries nothing but program output.

use crate::{Result, ShellError};
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter directive for the given verbosity flags
pub fn filter_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initialize the logging system
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let filter = EnvFilter::new(filter_directive(verbose, quiet));

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
        .map_err(|e| ShellError::logger(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Run an async operation inside a named span
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    f().instrument(span).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(false, false), "info");
        assert_eq!(filter_directive(true, false), "debug");
        assert_eq!(filter_directive(false, true), "error");
        // quiet wins
        assert_eq!(filter_directive(true, true), "error");
    }

    #[test]
    fn test_init_logger_twice_fails_cleanly() {
        // The global subscriber can only be set once per process, and other
        // tests may have set it already.
        let _ = init_logger(false, false);
        let second = init_logger(true, false);
        assert!(matches!(second, Err(ShellError::Logger(_))));
    }

    #[tokio::test]
    async fn test_with_async_operation_span() {
        let executed = AtomicBool::new(false);
        let flag = &executed;

        let result = with_async_operation_span("cat", move || async move {
            flag.store(true, Ordering::SeqCst);
            "done"
        })
        .await;

        assert!(executed.load(Ordering::SeqCst));
        assert_eq!(result, "done");
    }
}
