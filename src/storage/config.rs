use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const APP_DIR: &str = "class-timetable";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub store: StoreConfig,
    pub local: LocalConfig,
    pub form: FormConfig,
    pub ui: UiConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Remote,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub document: String,
    #[serde(default)]
    pub api_token: String,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalConfig {
    pub database: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    pub subjects: Vec<String>,
    pub instructors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub scale: u32,
    pub width: u16,
    pub height: u16,
    pub background: String,
    #[serde(default = "default_export_theme")]
    pub theme: String,
}

fn default_export_theme() -> String {
    "blossom".to_string()
}

impl StoreConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }

    pub fn api_token(&self) -> Option<&str> {
        Some(self.api_token.trim()).filter(|token| !token.is_empty())
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = Self::config_dir();

        Self {
            store: StoreConfig {
                backend: StoreBackend::Remote,
                url: "http://localhost:8080/v1/documents".to_string(),
                document: "timetables/main".to_string(),
                api_token: String::new(),
                poll_interval_ms: 2000,
            },
            local: LocalConfig {
                database: config_dir.join("timetable.db"),
            },
            form: FormConfig {
                subjects: vec![
                    "Anatomy (Sem 1)".to_string(),
                    "Physiology (Sem 1)".to_string(),
                    "Biochemistry (Sem 1)".to_string(),
                    "Research Methods (Sem 1)".to_string(),
                ],
                instructors: vec![
                    "Prof. Shad".to_string(),
                    "Prof. Sandeep".to_string(),
                    "Prof. Shelmi".to_string(),
                ],
            },
            ui: UiConfig {
                theme: "default".to_string(),
            },
            export: ExportConfig {
                output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
                scale: 2,
                width: 130,
                height: 40,
                background: "#fff5f7".to_string(),
                theme: default_export_theme(),
            },
        }
    }
}
