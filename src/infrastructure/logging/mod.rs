// Logging module - Logging infrastructure
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging system. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_directives = format!("serial_ws_echo={},tower_http=warn,warn", default_level);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!("Logging initialized at {}", default_level);
    Ok(())
}
