//! Subscriber setup for binaries. The library itself only emits `tracing` events.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, LoggingConfig};
use crate::foundation::error::{StimflowError, StimflowResult};

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` overrides `config.level`. Calling this again after a subscriber is installed is a
/// no-op.
pub fn init(config: &LoggingConfig) -> StimflowResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.trim()))
        .map_err(|e| StimflowError::config(format!("logging.level: {e}")))?;

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::NONE)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_filter(filter)
            .boxed(),
    };

    // Already initialized (tests, embedding hosts) is fine.
    let _ = tracing_subscriber::registry().with(layer).try_init();
    Ok(())
}
