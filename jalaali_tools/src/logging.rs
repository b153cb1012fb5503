use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ToolConfig;
use crate::error::ToolError;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs go to stderr so stdout only carries
/// conversion results.
///
/// The level comes from the config (or `--log-level`), then `RUST_LOG`, then
/// `warn`. A configured directive that does not parse is an error; a bad
/// `RUST_LOG` falls back to `warn`. Calling this twice keeps the first
/// subscriber.
pub fn init_tracing(config: &ToolConfig) -> Result<(), ToolError> {
    let filter = match config.log_filter()? {
        Some(filter) => filter,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
