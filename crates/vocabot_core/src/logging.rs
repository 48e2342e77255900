//! Process-wide logging for scheduled runs.
//!
//! # Responsibility
//! - Start one `flexi_logger` backend per process, to rotating files or stderr.
//! - Route panics through the logger as a single `event=panic_captured` line.
//!
//! # Invariants
//! - A second `init_logging` with the same settings is a no-op.
//! - A second `init_logging` with different settings is refused, never applied.
//! - Setup failures are returned as `LoggingError`, never panicked on.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "vocabot";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    Directory(PathBuf),
}

impl LogTarget {
    /// Stderr for `None`; otherwise the directory, made absolute against the
    /// working directory when given relative.
    pub fn resolve(dir: Option<&Path>) -> Self {
        match dir {
            None => Self::Stderr,
            Some(dir) if dir.is_absolute() => Self::Directory(dir.to_path_buf()),
            Some(dir) => match std::env::current_dir() {
                Ok(cwd) => Self::Directory(cwd.join(dir)),
                Err(_) => Self::Directory(dir.to_path_buf()),
            },
        }
    }
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => write!(f, "stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Failure while starting the logger.
#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    CreateDir { dir: PathBuf, source: io::Error },
    Backend(flexi_logger::FlexiLoggerError),
    Conflict {
        active_level: LevelFilter,
        active_target: LogTarget,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error|off"
            ),
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
            Self::Conflict {
                active_level,
                active_target,
            } => write!(
                f,
                "logging already running at `{active_level}` to `{active_target}`"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::UnknownLevel(_) | Self::Conflict { .. } => None,
        }
    }
}

impl From<flexi_logger::FlexiLoggerError> for LoggingError {
    fn from(value: flexi_logger::FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

struct ActiveLogger {
    level: LevelFilter,
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Parses a level name such as `info` or `WARN`.
///
/// # Errors
/// - `LoggingError::UnknownLevel` for anything `log` does not recognize.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| LoggingError::UnknownLevel(level.trim().to_string()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Starts logging at `level` to `target`.
///
/// # Errors
/// - `UnknownLevel` when `level` does not parse.
/// - `CreateDir` or `Backend` when the backend cannot start.
/// - `Conflict` when logging already runs with other settings.
pub fn init_logging(level: &str, target: LogTarget) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let active = ACTIVE.get_or_try_init(|| start(level, &target))?;

    if active.level != level || active.target != target {
        return Err(LoggingError::Conflict {
            active_level: active.level,
            active_target: active.target.clone(),
        });
    }
    Ok(())
}

fn start(level: LevelFilter, target: &LogTarget) -> Result<ActiveLogger, LoggingError> {
    let spec = level.as_str().to_ascii_lowercase();
    let logger = Logger::try_with_str(&spec)?;

    let handle = match target {
        LogTarget::Stderr => logger
            .format_for_stderr(flexi_logger::detailed_format)
            .start()?,
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                dir: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir.as_path()).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
    };

    route_panics_to_log();
    info!(
        "event=logging_init module=core status=ok level={} target={} version={} os={}",
        spec,
        target,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        level,
        target: target.clone(),
        _handle: handle,
    })
}

/// Only called from inside `ACTIVE` initialization, so it runs once.
fn route_panics_to_log() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            single_line(payload, PANIC_PAYLOAD_LIMIT)
        );
        previous(panic_info);
    }));
}

/// Flattens `text` to one line of at most `limit` chars, marking truncation.
fn single_line(text: &str, limit: usize) -> String {
    let mut chars = text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c });
    let mut line: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{init_logging, parse_level, single_line, LogTarget, LoggingError};
    use log::LevelFilter;
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn parse_level_is_case_insensitive() {
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("trace").unwrap(), LevelFilter::Trace);
    }

    #[test]
    fn parse_level_rejects_unknown_names() {
        let err = parse_level("loud").unwrap_err();
        assert!(matches!(err, LoggingError::UnknownLevel(ref name) if name == "loud"));
    }

    #[test]
    fn resolve_keeps_absolute_and_anchors_relative_dirs() {
        assert_eq!(LogTarget::resolve(None), LogTarget::Stderr);

        let absolute = std::env::temp_dir().join("vocabot-logs");
        assert_eq!(
            LogTarget::resolve(Some(&absolute)),
            LogTarget::Directory(absolute.clone())
        );

        let LogTarget::Directory(resolved) = LogTarget::resolve(Some(Path::new("logs"))) else {
            panic!("directory expected");
        };
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs"));
    }

    #[test]
    fn single_line_flattens_and_truncates() {
        assert_eq!(single_line("a\nb\rc", 10), "a b c");
        assert_eq!(single_line("犬犬犬犬", 2), "犬犬...");
        assert_eq!(single_line("abc", 3), "abc");
    }

    #[test]
    fn second_init_is_noop_for_same_settings_and_refused_otherwise() {
        // The logger is process-global, so every init assertion lives here.
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "vocabot-logging-{}-{nanos}",
            std::process::id()
        ));
        let target = LogTarget::Directory(dir.clone());

        init_logging("info", target.clone()).expect("first init");
        init_logging("INFO", target.clone()).expect("same settings");
        assert!(dir.is_dir());

        let err = init_logging("debug", target).expect_err("level change refused");
        assert!(matches!(
            err,
            LoggingError::Conflict {
                active_level: LevelFilter::Info,
                ..
            }
        ));
        let err = init_logging("info", LogTarget::Stderr).expect_err("target change refused");
        assert!(err.to_string().contains("already running"));
    }
}
