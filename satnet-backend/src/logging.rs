use std::{
    fs,
    path::Path,
};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

const LOG_RETENTION_DAYS: i64 = 3;

#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Map a configured level onto one `EnvFilter` accepts, falling back to `info`.
pub fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

pub fn init_logging(log_dir: impl AsRef<Path>, prefix: &str, level: &str) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref();

    let normalized = normalize_level(level);
    let builder = EnvFilter::builder()
        .with_default_directive(normalized.parse()?);

    let console_filter = builder.clone().parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());
    let file_filter = builder.parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create file appender")?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if normalized != level.trim().to_lowercase() {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    let cutoff = Utc::now() - Duration::days(LOG_RETENTION_DAYS);
    match cleanup_old_logs(log_dir, prefix, cutoff) {
        Ok(deleted) if deleted > 0 => tracing::info!("Deleted {} old log files", deleted),
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
    }

    Ok(LoggerGuard(guard))
}

/// Delete `<prefix>*.log` files in `log_dir` last modified before `cutoff`.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, cutoff: DateTime<Utc>) -> std::io::Result<usize> {
    let mut deleted = 0;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(prefix) && file_name.ends_with(".log") {
                let metadata = fs::metadata(&path)?;
                if let Ok(modified) = metadata.modified() {
                    let modified: DateTime<Utc> = modified.into();
                    if modified < cutoff {
                        fs::remove_file(&path)?;
                        tracing::debug!("Old log file deleted: {}", file_name);
                        deleted += 1;
                    }
                }
            }
        }
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("debug"), "debug");
        assert_eq!(normalize_level(" WARN "), "warn");
        assert_eq!(normalize_level("verbose"), "info");
    }

    #[test]
    fn test_cleanup_old_logs() {
        let dir = std::env::temp_dir().join(format!("satnet-log-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("satnet.2026-01-01.log"), "old").unwrap();
        fs::write(dir.join("other.log"), "other").unwrap();
        fs::write(dir.join("satnet.txt"), "not a log").unwrap();

        // A cutoff in the future makes every matching file stale
        let deleted = cleanup_old_logs(&dir, "satnet", Utc::now() + Duration::days(1)).unwrap();
        assert_eq!(deleted, 1);
        assert!(!dir.join("satnet.2026-01-01.log").exists());
        assert!(dir.join("other.log").exists());
        assert!(dir.join("satnet.txt").exists());

        // Nothing is stale against a cutoff in the past
        fs::write(dir.join("satnet.2026-01-02.log"), "fresh").unwrap();
        let deleted = cleanup_old_logs(&dir, "satnet", Utc::now() - Duration::days(1)).unwrap();
        assert_eq!(deleted, 0);

        fs::remove_dir_all(&dir).unwrap();
    }
}
