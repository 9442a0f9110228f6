use crate::domain::config::RelaySettings;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command line arguments for serial-ws-echo
#[derive(Parser, Debug)]
#[command(
    name = "serial-ws-echo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Serial websocket echo",
    long_about = "Small commandline application that sends messages received from serialport \
                  thru websocket."
)]
pub struct Args {
    /// Device to listen for data
    #[arg(short = 'D', long)]
    pub device: Option<String>,

    /// Baudrate that will be used [default: 9600]
    #[arg(short, long)]
    pub baudrate: Option<u32>,

    /// Port that websocket server will listen [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address that websocket server will bind [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "FILE")]
    pub init_config: Option<PathBuf>,
}

impl Args {
    /// Overlay the flags that were given onto file settings.
    pub fn apply_to(&self, settings: &mut RelaySettings) {
        if let Some(device) = &self.device {
            settings.device = Some(device.clone());
        }
        if let Some(baudrate) = self.baudrate {
            settings.baudrate = baudrate;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(host) = self.host {
            settings.host = host;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "serial-ws-echo",
            "-D",
            "/dev/ttyUSB0",
            "-b",
            "115200",
            "-p",
            "9000",
        ])
        .unwrap();
        assert_eq!(args.device.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(args.baudrate, Some(115200));
        assert_eq!(args.port, Some(9000));
    }

    #[test]
    fn test_long_flags() {
        let args = Args::try_parse_from([
            "serial-ws-echo",
            "--device",
            "/dev/ttyACM0",
            "--baudrate",
            "57600",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
        ])
        .unwrap();
        assert_eq!(args.device.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(args.baudrate, Some(57600));
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.host, Some("127.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_non_numeric_values_are_rejected() {
        for (flag, value) in [("-b", "abc"), ("-p", "abc"), ("-p", "70000")] {
            let argv = ["serial-ws-echo", "-D", "/dev/ttyUSB0", flag, value];
            let result = Args::try_parse_from(argv);
            assert!(result.is_err(), "{} {} should be rejected", flag, value);
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["serial-ws-echo", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_defaults_apply_when_flags_absent() {
        let args = Args::try_parse_from(["serial-ws-echo", "-D", "/dev/ttyUSB0"]).unwrap();
        let mut settings = RelaySettings::default();
        args.apply_to(&mut settings);

        let config = settings.validate().unwrap();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_flags_override_file_settings() {
        let args = Args::try_parse_from(["serial-ws-echo", "-p", "9001"]).unwrap();
        let mut settings = RelaySettings {
            device: Some("/dev/from-file".to_string()),
            baudrate: 19200,
            ..RelaySettings::default()
        };
        args.apply_to(&mut settings);

        assert_eq!(settings.device.as_deref(), Some("/dev/from-file"));
        assert_eq!(settings.baudrate, 19200);
        assert_eq!(settings.port, 9001);
    }
}
