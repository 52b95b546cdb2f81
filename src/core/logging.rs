//! Logging and terminal output.
//!
//! - File logging (JSON, daily rolling) via tracing-appender
//! - Warn-level stderr logging for command-line mode
//! - `log` macros bridged into tracing (tracing-subscriber's `tracing-log` feature)
//! - miette report hook tuned to the detected terminal
//! - Small styled print helpers for CLI output (console)

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use console::style;
use flate2::write::GzEncoder;
use flate2::Compression;
use supports_color::Stream;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "quest-viewer.log";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

/// Terminal color support levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLevel {
    /// 24-bit TrueColor (16.7M colors)
    TrueColor,
    /// 256-color palette
    Ansi256,
    /// 16 ANSI colors
    Ansi16,
    /// No color support
    NoColor,
}

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_level: ColorLevel,
    pub supports_unicode: bool,
    pub is_interactive: bool,
    /// Whether stderr is a terminal. Status lines and console logs go there.
    pub stderr_interactive: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from environment
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let color_level = match supports_color::on(Stream::Stdout) {
            Some(support) if support.has_16m => ColorLevel::TrueColor,
            Some(support) if support.has_256 => ColorLevel::Ansi256,
            Some(support) if support.has_basic => ColorLevel::Ansi16,
            _ => ColorLevel::NoColor,
        };

        let is_interactive = io::stdout().is_terminal();
        let stderr_interactive = io::stderr().is_terminal();

        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            color_level,
            supports_unicode,
            is_interactive,
            stderr_interactive,
        }
    }

    /// Check if colors should be used
    pub fn should_colorize(&self) -> bool {
        self.is_interactive && self.color_level != ColorLevel::NoColor
    }

    /// Check if output written to stderr should carry ANSI colours
    pub fn should_colorize_stderr(&self) -> bool {
        self.stderr_interactive && self.color_level != ColorLevel::NoColor
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Directory for log files: `<data_dir>/quest-viewer/logs`.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("quest-viewer").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn file_writer() -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard, PathBuf) {
    let log_dir = log_dir();
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    (non_blocking, guard, log_dir)
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

// `SubscriberInitExt::init` also installs the `log` -> tracing bridge.
fn finish_init(log_dir: PathBuf) {
    init_miette();

    let compress_dir = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(compress_dir);
    });

    log::debug!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );
}

/// Initialize logging for command-line mode.
///
/// JSON lines go to the rolling log file. Warnings and errors also go to
/// stderr, coloured only when stderr is a terminal. The returned guard must
/// be held until exit so buffered lines are flushed.
pub fn init() -> WorkerGuard {
    let (non_blocking, guard, log_dir) = file_writer();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter("info"));

    // stderr keeps stdout clean for piped HTML output
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(get_terminal_caps().should_colorize_stderr())
        .pretty()
        .with_filter(env_filter("warn"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    finish_init(log_dir);
    guard
}

/// Initialize logging for TUI mode.
///
/// Same as [`init()`] without the console layer: ratatui owns the terminal.
pub fn init_tui() -> WorkerGuard {
    let (non_blocking, guard, log_dir) = file_writer();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter("info"));

    tracing_subscriber::registry().with(file_layer).init();

    finish_init(log_dir);
    guard
}

/// Whether a file in the log directory is a finished log that should be gzipped.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX)
        && name.len() > LOG_FILE_PREFIX.len()
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress old log files in the background
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &std::path::Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}

/// Initialize miette for error reporting
fn init_miette() {
    let caps = get_terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(caps.color_level == ColorLevel::TrueColor)
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(caps.should_colorize_stderr())
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}

// ============================================================================
// Console Output Utilities
// ============================================================================

fn prefix(unicode: &'static str, ascii: &'static str) -> &'static str {
    if get_terminal_caps().supports_unicode {
        unicode
    } else {
        ascii
    }
}

// Status lines go to stderr; stdout is reserved for command output.

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!(
        "{} {}",
        style(prefix("✓", "[ok]")).for_stderr().green(),
        style(message).for_stderr().green()
    );
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        style(prefix("✗", "[error]")).for_stderr().red(),
        style(message).for_stderr().red().bold()
    );
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!(
        "{} {}",
        style(prefix("ℹ", "[info]")).for_stderr().blue(),
        style(message).for_stderr().blue()
    );
}
