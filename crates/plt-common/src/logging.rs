//! ---
//! plt_section: "01-core-functionality"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Tracing subscriber setup for harness tools."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! Every harness tool logs to stderr; stdout is reserved for the endpoint
//! maps, recipes and parameter sets that runners consume.

use anyhow::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::{self, time::UtcTime, MakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "PLT_LOG";
const FALLBACK_LOG_ENV: &str = "RUST_LOG";

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static STDERR_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Console log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Pick the filter directive: `PLT_LOG`, then `RUST_LOG`, then the
/// configured default. Blank variables are skipped.
fn filter_directive<F>(lookup: F, configured: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, FALLBACK_LOG_ENV]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned())
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let directive = filter_directive(|key| std::env::var(key).ok(), &config.filter);
    EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!(
            "invalid log filter `{}` ({}); using `{}`",
            directive, err, config.filter
        );
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

fn console_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(UtcTime::rfc_3339())
            .json()
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(writer)
            .boxed(),
    }
}

/// Console plus daily rolling JSON file under `config.directory`.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory)?;
    let prefix = config.file_prefix.as_deref().unwrap_or(service_name);

    let file_appender = daily(&config.directory, format!("{}.log", prefix));
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());

    let _ = FILE_GUARD.set(file_guard);
    let _ = STDERR_GUARD.set(stderr_guard);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_timer(UtcTime::rfc_3339())
        .json()
        .with_writer(file_writer)
        .boxed();

    let installed = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console_layer(config.format, stderr_writer))
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        info!(service = %service_name, log_dir = %config.directory.display(), format = ?config.format, "tracing initialised");
    } else {
        warn!(service = %service_name, "tracing subscriber already installed");
    }
    Ok(())
}

/// Console-only subscriber honouring the configured format and filter.
/// Safe to call repeatedly; later calls are no-ops.
pub fn init_console(config: &LoggingConfig) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console_layer(config.format, std::io::stderr))
        .try_init();
}
