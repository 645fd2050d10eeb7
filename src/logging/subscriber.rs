//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::utils::{colorize, format_local_datetime, format_local_time, log_file_path, strip_ansi};

/// Target used for section headers.
pub(super) const SECTION_TARGET: &str = "dotfiles::section";
/// Target used for completed actions.
pub(super) const SUCCESS_TARGET: &str = "dotfiles::success";
/// Target used for actions skipped by simulation mode.
pub(super) const DRY_RUN_TARGET: &str = "dotfiles::dry_run";

const CYAN: u8 = 36;
const GREEN: u8 = 32;
const RED: u8 = 31;
const YELLOW: u8 = 33;
const DIM: u8 = 90;
const HIGHLIGHT: u8 = 96;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one event the way it appears on the console.
///
/// Split out of the formatter so the line layout can be tested without a
/// subscriber.
pub(super) fn render_console_line(level: tracing::Level, target: &str, msg: &str) -> String {
    match level {
        tracing::Level::ERROR => format!("{}  {}", colorize("✗", RED), colorize(msg, RED)),
        tracing::Level::WARN => format!("{}  {}", colorize("⚠", YELLOW), colorize(msg, YELLOW)),
        tracing::Level::INFO if target == SECTION_TARGET => {
            let rule = "─".repeat(msg.chars().count());
            format!("\n{}\n{}", colorize(msg, HIGHLIGHT), colorize(&rule, DIM))
        }
        tracing::Level::INFO if target == SUCCESS_TARGET => {
            format!("{}  {}", colorize("✓", GREEN), colorize(msg, GREEN))
        }
        tracing::Level::INFO if target == DRY_RUN_TARGET => format!(
            "{}  {} {}",
            colorize("⚠", YELLOW),
            colorize("[DRY RUN]", DIM),
            colorize(msg, DIM)
        ),
        tracing::Level::INFO => format!("{}  {}", colorize("ℹ", CYAN), colorize(msg, CYAN)),
        _ => format!("   {}", colorize(msg, DIM)),
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Always captures events at `DEBUG` level and above regardless of the
/// console verbosity setting.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open (or create) the log file for `command`, write a run header, and
    /// return a new `FileLayer` ready to receive events.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("DOTFILES_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             Dotfiles {command} {version} {}\n\
             ==========================================\n",
            format_local_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_local_time();

        let line = match (level, target) {
            (tracing::Level::INFO, SECTION_TARGET) => format!("[{ts}] ==> {msg}"),
            (tracing::Level::INFO, SUCCESS_TARGET) => format!("[{ts}]     [ok] {msg}"),
            (tracing::Level::INFO, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG, _) => format!("[{ts}]     [debug] {msg}"),
            _ => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits symbol-prefixed,
/// colorized status lines.
struct StatusFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for StatusFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            render_console_line(*metadata.level(), metadata.target(), &extractor.message)
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console layer that prints every status line to stdout and a
/// file layer that writes all events (including `debug`) to
/// `$XDG_CACHE_HOME/dotfiles/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let console_layer = fmt::layer()
        .event_format(StatusFormatter)
        .with_writer(std::io::stdout)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
