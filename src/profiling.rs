/// Profiling and logging utilities for dungeon generation.
///
/// This module provides structured profiling capabilities using the `tracing` crate.
/// It includes a scoped timer that logs when it is dropped and the subscriber
/// setup used by the binary.
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A profiler that measures execution time and logs performance metrics.
pub struct Profiler {
    name: String,
    start_time: Instant,
}

impl Drop for Profiler {
    fn drop(&mut self) {
        let elapsed = self.start_time.elapsed();
        debug!(
            name = %self.name,
            elapsed_us = elapsed.as_micros(),
            "Operation completed"
        );
    }
}

impl Profiler {
    /// Creates a new profiler for the given operation.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the operation being profiled
    pub fn new(name: &str) -> Self {
        debug!(name = %name, "Starting operation");
        Self {
            name: name.to_string(),
            start_time: Instant::now(),
        }
    }

    /// Time elapsed since the profiler was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a metric for the current operation.
    pub fn metric(&self, metric_name: &str, value: impl std::fmt::Display) {
        debug!(
            name = %self.name,
            metric = metric_name,
            value = %value,
            "Performance metric"
        );
    }
}

/// Macro for profiling a function or block of code.
///
/// This macro creates a profiler and automatically logs the elapsed time
/// when the scope ends.
///
/// # Examples
///
/// ```rust
/// dungeon_tiles::profile_scope!("dungeon_generation");
/// // ... code to profile ...
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profiler = $crate::profiling::Profiler::new($name);
    };
}

/// Initializes the tracing subscriber.
///
/// Logs go to stdout and to `dungeon.log` in the working directory. The
/// filter is read from `RUST_LOG` and defaults to `info` for this crate.
pub fn init_profiling() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dungeon_tiles=info,warn"));

    let file_appender = tracing_appender::rolling::never(".", "dungeon.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; the subscriber is global,
    // so the guard has to live for the rest of the process.
    Box::leak(Box::new(guard));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout).compact())
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact(),
        )
        .init();

    info!("Logging initialized, writing to dungeon.log");
}
