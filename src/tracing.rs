//! Subscriber wiring for the `tabview` binary
//!
//! The library only emits events. The binary installs two sinks: stderr,
//! filtered by `RUST_LOG` (default `warn`), and a daily `tabview.log` under
//! the config directory's `logs/`, which always records `debug` so a failed
//! render can be diagnosed after the fact. Useful filters:
//! `RUST_LOG=tabview::update=debug` follows revisions through the coordinator,
//! `RUST_LOG=tabview::csv=trace` shows tokenizer decisions.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the stderr and log-file sinks. Call once, from `main`.
///
/// Stderr keeps stdout free for rendered markup. Without a usable log
/// directory only the stderr sink is installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tabview.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("tabview: logging to stderr only ({})", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
