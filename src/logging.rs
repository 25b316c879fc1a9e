//! Logging initialization
//!
//! Console output is always enabled (plain or JSON per config); file output
//! is optional and goes through a non-blocking daily-rolling appender. The
//! returned guard must be held for the lifetime of the process so buffered
//! log lines are flushed on shutdown.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    // RUST_LOG wins over the configured level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.file_enabled {
        let appender =
            tracing_appender::rolling::daily(&config.file_directory, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        if config.json {
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
            registry.with(fmt::layer().json()).with(file_layer).init();
        } else {
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
            registry.with(fmt::layer()).with(file_layer).init();
        }
        Ok(Some(guard))
    } else if config.json {
        registry.with(fmt::layer().json()).init();
        Ok(None)
    } else {
        registry.with(fmt::layer()).init();
        Ok(None)
    }
}
