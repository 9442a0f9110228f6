use crate::cli::args::Args;
use crate::core::service;
use crate::domain::config::LoggingConfig;
use crate::domain::error::{EchoError, EchoResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use tracing::info;

/// Execute the command line
pub async fn execute_command(args: Args) -> EchoResult<()> {
    let config_manager = ConfigManager::new();

    if let Some(path) = &args.init_config {
        config_manager.init_config(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if args.list_ports {
        return list_ports();
    }

    let mut config = match &args.config {
        Some(path) => config_manager.load_config_from_path(path)?,
        None => config_manager.load_config()?,
    };
    args.apply_to(&mut config.relay);
    let relay_config = config.relay.validate()?;

    setup_logging(&config.logging, &args)?;

    tokio::select! {
        result = service::run(relay_config) => result,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}

fn list_ports() -> EchoResult<()> {
    let ports = serialport::available_ports()?;

    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    println!("Available serial ports:");
    for port in ports {
        println!("  {}", port.port_name);
    }
    Ok(())
}

fn setup_logging(config: &LoggingConfig, args: &Args) -> EchoResult<()> {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        config.level.as_str()
    };

    init_logging(level)
        .map_err(|e| EchoError::config(format!("Failed to initialize logging: {}", e)))
}
