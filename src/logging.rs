// src/logging.rs
// =============================================================================
// Sets up the scan log.
//
// Every run appends to one log file (web_scanner.log by default). Each event
// becomes a single line:
//
//   2024-05-01 14:03:07,512:WARNING:Broken link found: https://... with status code 404
//
// We use `tracing` for the log calls themselves (info!, warn!, error!) and
// `tracing-subscriber` to decide where and how they are written. The
// subscriber is installed once, globally, at startup; the file handle lives
// inside it until the process exits.
//
// Rust concepts:
// - Traits: FormatEvent lets us plug our own line layout into tracing
// - Mutex: The file is shared, so writes go through a lock
// =============================================================================

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

// Writes `timestamp:LEVEL:message`
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        write!(writer, "{}:{}:", timestamp, level_name(event.metadata().level()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

// Only our own events go to the log file
//
// RUST_LOG=debug would otherwise pull hyper's and reqwest's internals in too.
fn own_events_only() -> Targets {
    Targets::new().with_target(env!("CARGO_CRATE_NAME"), LevelFilter::TRACE)
}

// The formatting layer behind the log file, writing to `writer`
pub fn log_layer<S, W>(writer: W, filter: EnvFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .event_format(LogLineFormat)
        .with_writer(writer)
        .with_filter(filter)
        .with_filter(own_events_only())
}

// Installs the global subscriber, appending to `path`
//
// The level filter comes from RUST_LOG when set, otherwise "info".
pub fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(log_layer(Mutex::new(file), filter))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
