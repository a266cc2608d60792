//! Logging setup for shopperd.
//!
//! The subscriber is installed before the config is read so config loading
//! can log. The configured level is applied afterwards through a reload
//! handle, unless RUST_LOG is set.

use anyhow::{Context, Result};
use shopper_common::config::LoggingConfig;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Filter used until the config is loaded.
pub const BOOT_LEVEL: &str = "info";

/// Handle for swapping the filter once the config is known.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    rust_log: Option<String>,
}

impl LogHandle {
    /// Apply `logging.level`. RUST_LOG, when set, keeps precedence.
    pub fn apply(&self, config: &LoggingConfig) -> Result<()> {
        if self.rust_log.is_some() {
            return Ok(());
        }
        self.handle
            .reload(EnvFilter::new(&config.level))
            .context("Failed to apply logging.level")
    }
}

/// Build the subscriber and its reload handle without installing it.
pub fn build<W>(
    rust_log: Option<String>,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::new(rust_log.as_deref().unwrap_or(BOOT_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(writer));
    (subscriber, LogHandle { handle, rust_log })
}

/// Install the global subscriber, writing to stderr.
pub fn init() -> Result<LogHandle> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let (subscriber, handle) = build(rust_log, std::io::stderr);
    subscriber
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(handle)
}
