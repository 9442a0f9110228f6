use crate::domain::error::{EchoError, EchoResult};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// serial-ws-echo file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EchoConfig {
    /// Relay settings
    #[serde(default)]
    pub relay: RelaySettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relay settings as they appear in a configuration file. Every field may be
/// overridden from the command line before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    /// Serial device path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Serial baud rate
    #[serde(default = "default_baudrate")]
    pub baudrate: u32,
    /// Websocket listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Websocket listen address
    #[serde(default = "default_host")]
    pub host: IpAddr,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Validated relay configuration handed to the core at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub device: String,
    pub baudrate: u32,
    pub port: u16,
    pub host: IpAddr,
}

// Default value functions
pub fn default_baudrate() -> u32 {
    9600
}

pub fn default_port() -> u16 {
    8000
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            device: None,
            baudrate: default_baudrate(),
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RelaySettings {
    /// Check the settings and freeze them into a [`RelayConfig`].
    pub fn validate(self) -> EchoResult<RelayConfig> {
        let device = match self.device {
            Some(device) if !device.trim().is_empty() => device,
            Some(_) => return Err(EchoError::config("serial device path is empty")),
            None => return Err(EchoError::config("no serial device given (use --device)")),
        };

        if self.baudrate == 0 {
            return Err(EchoError::config("baudrate must be a positive integer"));
        }

        if self.port == 0 {
            return Err(EchoError::config("port must be a positive integer"));
        }

        Ok(RelayConfig {
            device,
            baudrate: self.baudrate,
            port: self.port,
            host: self.host,
        })
    }
}

impl RelayConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(device: Option<&str>) -> RelaySettings {
        RelaySettings {
            device: device.map(str::to_string),
            ..RelaySettings::default()
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = EchoConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: EchoConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.relay.baudrate, 9600);
        assert_eq!(deserialized.relay.port, 8000);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: EchoConfig = toml::from_str(
            r#"
            [relay]
            device = "/dev/ttyACM0"
            "#,
        )
        .unwrap();

        assert_eq!(config.relay.device.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(config.relay.baudrate, 9600);
        assert_eq!(config.relay.port, 8000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_accepts_defaults_with_device() {
        let config = settings(Some("/dev/ttyUSB0")).validate().unwrap();
        assert_eq!(config.device, "/dev/ttyUSB0");
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.bind_addr().port(), 8000);
    }

    #[test]
    fn test_validate_rejects_missing_device() {
        let result = settings(None).validate();
        assert!(matches!(result, Err(EchoError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_blank_device() {
        assert!(settings(Some("  ")).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_baudrate_and_port() {
        let mut zero_baud = settings(Some("/dev/ttyUSB0"));
        zero_baud.baudrate = 0;
        assert!(zero_baud.validate().is_err());

        let mut zero_port = settings(Some("/dev/ttyUSB0"));
        zero_port.port = 0;
        assert!(zero_port.validate().is_err());
    }

    #[test]
    fn test_non_numeric_baudrate_in_file_is_rejected() {
        let result: Result<EchoConfig, _> = toml::from_str(
            r#"
            [relay]
            device = "/dev/ttyUSB0"
            baudrate = "abc"
            "#,
        );
        assert!(result.is_err());
    }
}
