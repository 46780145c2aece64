use crate::{LogConfig, LogFormat, Severity};
use chrono::Local;
use serde_json::{Map, Value};
use std::fmt;
use std::io::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{debug, info, Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Timestamp layout of every record, millisecond precision
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in the main() before any fallible operations to ensure
/// colored error output. Safe to call multiple times.
///
/// Configuration:
/// - Shows file:line where errors occur
/// - Hides environment variables (less noise)
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Handle to the process logger returned by [`init_logging`].
///
/// The subscriber itself is global; the handle only carries what was
/// configured and lets the lifecycle flush stdout on exit.
#[derive(Clone, Debug)]
pub struct LogHandle {
    severity: Severity,
    appname: String,
}

impl LogHandle {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn appname(&self) -> &str {
        &self.appname
    }

    /// Push buffered records to the sink
    pub fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Initialize structured logging to stdout.
///
/// - `log.level` is the default filter directive; `RUST_LOG` directives
///   (e.g. `tower_http=trace`) are layered on top of it.
/// - Every record carries `time`, `level`, `msg` and the static `appname` tag.
/// - `LogFormat::Json` writes one JSON object per line,
///   `LogFormat::Console` a single human-readable line.
///
/// # Multiple Calls
///
/// Safe to call multiple times: if a global subscriber is already set
/// (common in tests) the call silently keeps the existing one.
pub fn init_logging(config: &LogConfig) -> LogHandle {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.as_level_filter().into())
        .from_env_lossy();

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(RecordFormat::new(config.appname.clone(), config.format))
                .with_writer(io::stdout),
        )
        .with(tracing_error::ErrorLayer::default()) // Capture span traces on errors
        .with(filter)
        .try_init();

    match result {
        Ok(_) => {
            info!(
                level = %config.level,
                format = ?config.format,
                "Logging initialized"
            );
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }

    LogHandle {
        severity: config.level,
        appname: config.appname.clone(),
    }
}

/// Event formatter producing the service's record layout.
///
/// An event carrying `fatal = true` is rendered with level `fatal`, which
/// `tracing` has no native level for.
#[derive(Clone, Debug)]
pub struct RecordFormat {
    appname: String,
    format: LogFormat,
}

impl RecordFormat {
    pub fn new(appname: impl Into<String>, format: LogFormat) -> Self {
        Self {
            appname: appname.into(),
            format,
        }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let time = Local::now().format(TIME_FORMAT).to_string();
        let level = if fields.fatal {
            "fatal"
        } else {
            level_name(meta.level())
        };
        let message = fields.message.take().unwrap_or_default();
        let caller = caller(meta);

        match self.format {
            LogFormat::Json => {
                let mut record = Map::new();
                record.insert("time".to_string(), Value::String(time));
                record.insert("level".to_string(), Value::String(level.to_string()));
                record.insert("appname".to_string(), Value::String(self.appname.clone()));
                record.insert("target".to_string(), Value::String(meta.target().to_string()));
                if let Some(caller) = caller {
                    record.insert("line".to_string(), Value::String(caller));
                }
                record.insert("msg".to_string(), Value::String(message));
                for (key, value) in fields.values {
                    record.entry(key).or_insert(value);
                }
                let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
                writeln!(writer, "{line}")
            }
            LogFormat::Console => {
                write!(
                    writer,
                    "{time} {:<5} [{}] {message}",
                    level.to_ascii_uppercase(),
                    self.appname
                )?;
                if let Some(caller) = caller {
                    write!(writer, " line={caller}")?;
                }
                for (key, value) in fields.values {
                    match value {
                        Value::String(s) => write!(writer, " {key}={s}")?,
                        other => write!(writer, " {key}={other}")?,
                    }
                }
                writeln!(writer)
            }
        }
    }
}

/// `file:line` of the call site, when the event carries it
fn caller(meta: &Metadata<'_>) -> Option<String> {
    match (meta.file(), meta.line()) {
        (Some(file), Some(line)) => Some(format!("{file}:{line}")),
        _ => None,
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fatal: bool,
    values: Vec<(String, Value)>,
}

impl FieldCollector {
    fn push(&mut self, field: &Field, value: Value) {
        match field.name() {
            "message" => {
                self.message = Some(match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
            }
            "fatal" => self.fatal = value.as_bool().unwrap_or(false),
            name => self.values.push((name.to_string(), value)),
        }
    }
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::String(format!("{:?}", value)));
    }
}
