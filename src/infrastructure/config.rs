use crate::domain::{
    config::EchoConfig,
    error::{EchoError, EchoResult},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file manager
pub struct ConfigManager {
    global_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a manager pointing at `~/.config/serial-ws-echo/config.toml`
    pub fn new() -> Self {
        Self {
            global_config_path: Self::default_global_config_path(),
        }
    }

    /// Create a manager with an explicit global configuration path
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load the global configuration, or defaults if there is none
    pub fn load_config(&self) -> EchoResult<EchoConfig> {
        match &self.global_config_path {
            Some(path) if path.exists() => self.load_config_from_path(path),
            _ => Ok(EchoConfig::default()),
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> EchoResult<EchoConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            EchoError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            EchoError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to specific path, creating parent directories
    pub fn save_config_to_path(&self, path: &Path, config: &EchoConfig) -> EchoResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    EchoError::config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| EchoError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            EchoError::config(format!("Failed to write config file {}: {}", path.display(), e))
        })
    }

    /// Write a default configuration file, refusing to overwrite one
    pub fn init_config(&self, path: &Path) -> EchoResult<()> {
        if path.exists() {
            return Err(EchoError::config(format!(
                "Configuration file {} already exists",
                path.display()
            )));
        }

        let mut config = EchoConfig::default();
        config.relay.device = Some("/dev/ttyUSB0".to_string());
        self.save_config_to_path(path, &config)
    }

    fn default_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("serial-ws-echo").join("config.toml"))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_global_config_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_global_path(temp_dir.path().join("missing.toml"));

        let config = manager.load_config().unwrap();
        assert!(config.relay.device.is_none());
        assert_eq!(config.relay.baudrate, 9600);
        assert_eq!(config.relay.port, 8000);
    }

    #[test]
    fn test_load_global_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "[relay]\ndevice = \"/dev/ttyACM1\"\nbaudrate = 115200\n\n",
                "[logging]\nlevel = \"debug\"\n",
            ),
        )
        .unwrap();

        let manager = ConfigManager::with_global_path(&path);
        let config = manager.load_config().unwrap();
        assert_eq!(config.relay.device.as_deref(), Some("/dev/ttyACM1"));
        assert_eq!(config.relay.baudrate, 115200);
        assert_eq!(config.relay.port, 8000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparsable_config_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[relay]\nport = \"eight thousand\"\n").unwrap();

        let manager = ConfigManager::new();
        let result = manager.load_config_from_path(&path);
        assert!(matches!(result, Err(EchoError::Config { .. })));
    }

    #[test]
    fn test_init_config_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let manager = ConfigManager::new();

        manager.init_config(&path).unwrap();
        let config = manager.load_config_from_path(&path).unwrap();
        assert_eq!(config.relay.device.as_deref(), Some("/dev/ttyUSB0"));

        assert!(manager.init_config(&path).is_err());
    }
}
