pub mod models;
pub mod services;

pub use models::{AnalysisResult, Confidence, FeatureVector, SegmentResult, TransitionDetail};
pub use services::{analyze, analyze_request, EngineConfig, ProfileRegistry};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "textprobe_";
const LOG_KEEP: usize = 30;

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Initialize logging. Console output goes to stderr so stdout stays machine-readable.
/// `TEXTPROBE_LOG_DIR` adds a per-session log file; `TEXTPROBE_DISABLE_FILE_LOG=1` suppresses it.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let logs_dir = match std::env::var("TEXTPROBE_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() && !env_flag("TEXTPROBE_DISABLE_FILE_LOG") => Some(PathBuf::from(p)),
        _ => None,
    };

    let mut log_file: Option<PathBuf> = None;
    let file_layer = logs_dir.and_then(|dir| {
        if let Err(e) = fs::create_dir_all(&dir) {
            eprintln!("Failed to create logs directory: {}", e);
            return None;
        }
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("{}{}.log", LOG_PREFIX, timestamp);
        let file_appender = rolling::never(&dir, &log_filename);
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        let _ = LOG_GUARD.set(file_guard);
        log_file = Some(dir.join(&log_filename));

        // Best-effort cleanup in the background
        let cleanup_dir = dir.clone();
        std::thread::spawn(move || cleanup_old_logs(&cleanup_dir, LOG_KEEP));

        Some(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_ok();

    if installed {
        info!(version = env!("CARGO_PKG_VERSION"), "logging.initialized");
        if let Some(path) = log_file {
            info!("Log file: {}", path.display());
        }
    }
}

fn cleanup_old_logs(logs_dir: &Path, keep: usize) {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with(LOG_PREFIX) && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return;
    }

    entries.sort_by_key(|e| {
        e.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    });

    let remove_count = entries.len().saturating_sub(keep);
    for entry in entries.into_iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_newest_logs() {
        let dir = std::env::temp_dir().join(format!("textprobe_logs_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for i in 0..5 {
            fs::write(dir.join(format!("{}{}.log", LOG_PREFIX, i)), "x").unwrap();
        }
        fs::write(dir.join("unrelated.txt"), "x").unwrap();

        cleanup_old_logs(&dir, 2);

        let logs = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(LOG_PREFIX))
            .count();
        assert_eq!(logs, 2);
        assert!(dir.join("unrelated.txt").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging();
        init_logging();
    }
}
