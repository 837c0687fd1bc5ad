//! Log to a daily rolling file so stdout stays clean for command output.

use shinkai_core::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `level` and `verbose`.
///
/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init(level: &str, verbose: bool) -> Option<WorkerGuard> {
    let directive = if verbose {
        "shinkai=debug".to_string()
    } else {
        format!("shinkai={level}")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let dir = AppConfig::log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        tracing::warn!("cannot create log directory {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(&dir, "shinkai.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
