//! YAML configuration: provider key and endpoints, server bind address.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const CONFIG_ENV: &str = "WEATHER_PAGE_CONFIG";

/* ============================ Config ============================ */

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub openweather: OpenWeatherCfg,
    #[serde(default)]
    pub server: ServerCfg,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OpenWeatherCfg {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerCfg {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_base_url() -> String { "https://api.openweathermap.org/data/2.5".into() }
fn default_icon_base_url() -> String { "https://openweathermap.org/img/wn".into() }
fn default_timeout_secs() -> u64 { 10 }
fn default_bind() -> String { "127.0.0.1:8080".into() }

impl Default for ServerCfg {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl OpenWeatherCfg {
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            icon_base_url: default_icon_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_yaml(s: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(s).context("parsing YAML config")?;
        Ok(cfg)
    }

    /// Applies the env key override and rejects an empty key.
    fn finish(mut self, env_key: Option<String>) -> Result<Self> {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            self.openweather.api_key = key;
        }
        self.openweather.api_key = self.openweather.api_key.trim().to_string();
        if self.openweather.api_key.is_empty() {
            bail!("openweather.api_key is empty (set it in the config or via ${API_KEY_ENV})");
        }
        Ok(self)
    }
}

/// Path to YAML config. Search order if not given:
/// $WEATHER_PAGE_CONFIG, ./config/weather-page.yaml, ./config.yaml,
/// ~/.config/weather-page/config.yaml
pub fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    let env_key = std::env::var(API_KEY_ENV).ok();

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(p) = explicit {
        if !p.exists() {
            bail!("Config file {} does not exist", p.display());
        }
        candidates.push(p);
    }
    if let Ok(p) = std::env::var(CONFIG_ENV) { candidates.push(PathBuf::from(p)); }
    candidates.push(PathBuf::from("./config/weather-page.yaml"));
    candidates.push(PathBuf::from("./config.yaml"));
    if let Some(mut d) = dirs::config_dir() {
        d.push("weather-page/config.yaml");
        candidates.push(d);
    }

    for path in candidates {
        if path.exists() {
            let s = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            let cfg = Config::from_yaml(&s)
                .with_context(|| format!("loading config {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            return cfg.finish(env_key);
        }
    }

    if env_key.is_some() {
        let cfg = Config {
            openweather: OpenWeatherCfg::with_key(String::new()),
            server: ServerCfg::default(),
        };
        return cfg.finish(env_key);
    }
    bail!("No config file found. Use --config, set ${CONFIG_ENV}, or provide ${API_KEY_ENV}");
}
