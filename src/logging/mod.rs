//! Logging infrastructure - structured tracing for builtin calls
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Zero cost while no subscriber is installed (library use)
//! - Configuration from `PYCOMPAT_LOG_*` variables or the config file
//! - Pretty, compact or JSON output to stdout, stderr or a rolling file
//! - One-time global initialization

use std::path::Path;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::errors::BuiltinError;

pub use tracing::{debug, error, info, trace, warn, Level};

/// Global logging state
static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Daily-rotated file `<directory>/<prefix>.<date>`
    File { directory: String, prefix: String },
}

impl LogOutput {
    /// File output from a path such as `logs/pycompat.log`
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let directory = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
            _ => ".".to_string(),
        };
        let prefix = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pycompat.log".to_string());

        LogOutput::File { directory, prefix }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Emit span open/close events
    pub span_events: bool,
    /// Extra filter directives (e.g., "pycompat::builtins=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().overlay_vars(lookup)
    }

    /// Apply `PYCOMPAT_LOG_*` on top of this config
    pub fn overlay_env(self) -> Self {
        self.overlay_vars(|key| std::env::var(key).ok())
    }

    /// Apply variables found through `lookup`; unset or invalid ones keep
    /// the current value.
    pub fn overlay_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // PYCOMPAT_LOG_LEVEL: trace, debug, info, warn, error
        if let Some(level) = lookup("PYCOMPAT_LOG_LEVEL").as_deref().and_then(parse_level) {
            self.level = level;
        }

        // PYCOMPAT_LOG_FORMAT: pretty, compact, json
        if let Some(format) = lookup("PYCOMPAT_LOG_FORMAT").as_deref().and_then(LogFormat::parse) {
            self.format = format;
        }

        // PYCOMPAT_LOG_FILE: path to log file
        if let Some(path) = lookup("PYCOMPAT_LOG_FILE").filter(|p| !p.is_empty()) {
            self.output = LogOutput::file(path);
        }

        // PYCOMPAT_LOG_SPANS: show span events
        if lookup("PYCOMPAT_LOG_SPANS").is_some() {
            self.span_events = true;
        }

        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Parse a level name, case-insensitively
pub fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize the global logging system.
///
/// Only the first call installs a subscriber; later calls return `None`.
/// The returned `WorkerGuard` flushes buffered output when dropped, so keep
/// it alive until the program exits.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let mut guard = None;
    LOGGER_INITIALIZED.get_or_init(|| {
        guard = install(config);
    });
    guard
}

/// Initialize logging from `PYCOMPAT_LOG_*`
pub fn init() -> Option<WorkerGuard> {
    init_logging(&LogConfig::from_env())
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

fn install(config: &LogConfig) -> Option<WorkerGuard> {
    let (layer, guard) = match &config.output {
        LogOutput::Stdout => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
            (fmt_layer(writer, config), guard)
        }
        LogOutput::Stderr => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            (fmt_layer(writer, config), guard)
        }
        LogOutput::File { directory, prefix } => {
            let appender = rolling::daily(directory, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (fmt_layer(writer, config), guard)
        }
    };

    let installed = tracing_subscriber::registry()
        .with(layer)
        .with(build_filter(config))
        .try_init();

    match installed {
        Ok(()) => Some(guard),
        // Another global subscriber won; our writer has nothing to flush
        Err(_) => None,
    }
}

fn fmt_layer<W>(writer: W, config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(span_events_config(config.span_events));

    match config.format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let base_filter = EnvFilter::from_default_env().add_directive(config.level.into());

    match &config.filter {
        Some(filter_str) => filter_str
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .fold(base_filter, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(_) => {
                    warn!("Invalid filter directive: {}", directive);
                    filter
                }
            }),
        None => base_filter,
    }
}

fn span_events_config(enabled: bool) -> FmtSpan {
    if enabled {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

// ============================================================================
// Builtin-specific logging functions
// ============================================================================

/// Log builtin function call
#[inline]
pub fn log_builtin_call(builtin: &str, arg_count: usize) {
    trace!(
        event = "builtin_call",
        function = builtin,
        args = arg_count,
        "Builtin function called"
    );
}

/// Log a builtin raising an exception
pub fn log_builtin_error(builtin: &str, err: &BuiltinError) {
    debug!(
        event = "builtin_error",
        function = builtin,
        exception = err.kind.exception_name(),
        message = %err.message,
        "Builtin function raised"
    );
}

/// Log type conversion
#[inline]
pub fn log_type_conversion(from_type: &str, to_type: &str) {
    trace!(
        event = "type_conversion",
        from = from_type,
        to = to_type,
        "Type conversion performed"
    );
}
