use gradecast::config::{AppConfig, LoggingConfig};
use gradecast::error::{GradecastError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Load configuration from `config_dir` and reject invalid values.
pub fn load_config(config_dir: &str) -> Result<AppConfig> {
    let config = AppConfig::load_from(config_dir)?;
    config
        .validate()
        .map_err(|errors| GradecastError::InvalidConfig(errors.join("; ")))?;
    Ok(config)
}

/// Server logging: stderr console output plus an optional daily-rotated file.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the server.
pub fn init_logging(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(cfg)));

    let console_layer: Box<dyn Layer<Registry> + Send + Sync> = if cfg.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    let mut guard = None;
    let file_layer = cfg.dir.as_deref().and_then(|log_dir| {
        // `rolling::daily` panics if it cannot create the initial file, so check first.
        if let Err(e) = ensure_writable(Path::new(log_dir)) {
            eprintln!("Warning: Log directory {log_dir} is not writable ({e}), file logging disabled");
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(log_dir, "gradecast.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

/// Directives used when `RUST_LOG` is unset: the configured level everywhere,
/// with this crate always at debug.
fn default_filter(cfg: &LoggingConfig) -> String {
    format!("{0},gradecast=debug,tower_http={0}", cfg.level)
}

/// Create `dir` and confirm a file can be opened for append inside it.
fn ensure_writable(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let test_path = dir.join(".gradecast_write_test");
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&test_path)?;
    let _ = std::fs::remove_file(&test_path);
    Ok(())
}

/// Logging for the `predict` command. Everything goes to stderr so stdout
/// carries only the prediction.
pub fn init_script_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
