//! Verbosity-gated line logger.
//!
//! A single [`Logger`] is built at startup from the `--verbose` flag and lent
//! to every service that reports progress. When verbose, each message is
//! written to stdout as `[LOG]: <message>`; otherwise nothing is printed.
//! Messages are also emitted as `tracing` debug events so `RUST_LOG=debug`
//! shows them on stderr.

use crate::messages::LOG_PREFIX;
use std::io::Write;
use std::sync::Mutex;
use tracing::debug;

pub struct Logger {
    verbose: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Creates a logger that prints to stdout.
    pub fn new(verbose: bool) -> Self {
        Self::with_sink(verbose, Box::new(std::io::stdout()))
    }

    /// Creates a logger writing to an arbitrary sink (for testing).
    pub fn with_sink(verbose: bool, sink: Box<dyn Write + Send>) -> Self {
        Self {
            verbose,
            sink: Mutex::new(sink),
        }
    }

    pub fn log(&self, message: &str) {
        debug!("{}", message);
        if !self.verbose {
            return;
        }
        // logging never fails the run
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}{}", LOG_PREFIX, message);
            let _ = sink.flush();
        }
    }
}

/// Installs the `tracing` subscriber used for diagnostics.
///
/// Output goes to stderr so stdout carries only the response. The filter comes
/// from `RUST_LOG`, falling back to `warn`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
