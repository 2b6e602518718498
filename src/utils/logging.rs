//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the binary. Library code only
//! emits events; it never installs a subscriber itself.
//!
//! The subscriber is installed before the config file is read, with
//! [`DEFAULT_LOG_FILTER`], and narrowed to the configured filter afterwards
//! through [`LogHandle::set_filter`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::utils::error::{AppError, AppResult};

/// Filter used until the configured one is known.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Build the event filter: `RUST_LOG` wins, otherwise `fallback`.
pub fn build_filter(fallback: &str) -> AppResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .map_err(|e| AppError::config(format!("Invalid log filter '{}': {}", fallback, e))),
    }
}

/// Swaps the active filter of the installed subscriber.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Replace the active filter; `RUST_LOG` still wins over `fallback`.
    pub fn set_filter(&self, fallback: &str) -> AppResult<()> {
        let filter = build_filter(fallback)?;
        self.handle
            .reload(filter)
            .map_err(|e| AppError::config(format!("Failed to update log filter: {}", e)))
    }
}

/// Install a fmt subscriber writing to stderr so stdout stays machine-readable.
pub fn init_logging(fallback: &str) -> AppResult<LogHandle> {
    let (filter, handle) = reload::Layer::new(build_filter(fallback)?);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| AppError::config(format!("Logging already initialized: {}", e)))?;
    Ok(LogHandle { handle })
}
