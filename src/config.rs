use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Runtime config.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: Url,
}

/// On-disk representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub api_base: String,
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("palaver")
}

fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl FileConfig {
    pub fn load() -> Result<Option<Self>, String> {
        let path = config_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        let cfg: FileConfig = serde_json::from_str(&data).map_err(|e| format!("parse config: {e}"))?;
        Ok(Some(cfg))
    }
}

fn parse_base(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("invalid API base {raw:?}: {e}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("invalid API base {raw:?}: not a base URL"));
    }
    Ok(url)
}

impl Config {
    /// Resolution order: env var → config file → default.
    pub fn resolve() -> Self {
        if let Ok(raw) = std::env::var("PALAVER_API_BASE") {
            match parse_base(&raw) {
                Ok(api_base) => {
                    log::info!("API base from environment: {}", api_base);
                    return Config { api_base };
                }
                Err(e) => log::warn!("Ignoring PALAVER_API_BASE: {}", e),
            }
        }

        match FileConfig::load() {
            Ok(Some(fc)) => match parse_base(&fc.api_base) {
                Ok(api_base) => {
                    log::info!("API base from config file: {}", api_base);
                    return Config { api_base };
                }
                Err(e) => log::warn!("Config file error: {}", e),
            },
            Ok(None) => log::info!("No config file found, using default API base"),
            Err(e) => log::warn!("Config file error: {}", e),
        }

        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
        }
    }
}

/// Pane split ratios, remembered across runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    pub directory_ratio: f32,
    pub details_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            directory_ratio: 0.25,
            details_ratio: 0.75,
        }
    }
}

impl LayoutConfig {
    fn path() -> PathBuf {
        config_dir().join("layout.json")
    }

    pub fn load() -> Self {
        fs::read_to_string(Self::path())
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("create config dir: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(data) => {
                if let Err(e) = fs::write(&path, data) {
                    log::warn!("write layout: {e}");
                }
            }
            Err(e) => log::warn!("serialize layout: {e}"),
        }
    }
}
