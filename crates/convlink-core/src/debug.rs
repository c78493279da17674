use std::fs::OpenOptions;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tracingfmt};

static INIT_LOG: Once = Once::new();

/// Sets up logging with maximum verbosity (trace level)
/// Mainly for unit tests
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Sets up default logging to stderr and optionally, a verbose log file
/// Returns a guard, that needs to be kept alive for logging to file to work
pub fn setup_logging_default(verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let logfile_and_filter = verbose_logfile.map(|file| (file, EnvFilter::new("trace")));
    setup_logging(get_default_stderr_filter(), logfile_and_filter)
}

pub fn get_default_stderr_filter() -> EnvFilter {
    // Stage-by-stage pipeline dumps stay off unless asked for via RUST_LOG
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Sets up logging to stderr and optionally, a verbose log file.
/// If an output file is requested, returns Some<WorkerGuard>. Keep this value
/// alive or logging to file may cease working.
fn setup_logging(stderr_filter: EnvFilter, outfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(outfile)
            .expect("Failed to open log file");
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .with_writer(file_writer)
                .with_ansi(false);
            let stderr_layer = tracingfmt::layer().with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(stderr_layer.with_filter(stderr_filter))
                .init();
        });

        Some(guard)
    } else {
        INIT_LOG.call_once(|| {
            let stderr_layer = tracingfmt::layer().with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(stderr_layer.with_filter(stderr_filter))
                .init();
        });
        None
    }
}
