//! Tracing subscriber setup.

use crate::error::{ToolError, ToolResult};
use iris_config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Output goes to
/// stderr so command output on stdout stays clean.
pub fn init_logging(config: &LoggingConfig) -> ToolResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| ToolError::Logging(format!("invalid filter '{}': {e}", config.filter)))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| ToolError::Logging(e.to_string()))
}
