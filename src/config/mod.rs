//! Configuration management

use anyhow::{ensure, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::audiobooks::DEFAULT_AUDIOBOOKS_URL;
use crate::catalog::cloud::DEFAULT_CLOUD_URL;
use crate::catalog::http::DEFAULT_FETCH_TIMEOUT;
use crate::catalog::tunein::DEFAULT_TUNEIN_URL;

const APP_DIR_NAME: &str = "ais-media-browser";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Title of the library root node
    #[serde(default = "default_library_title")]
    pub library_title: String,

    /// Upper bound on each catalog fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub ais_cloud: AisCloudConfig,

    #[serde(default)]
    pub audiobooks: AudioBooksConfig,

    #[serde(default)]
    pub tunein: TuneInConfig,
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn default_port() -> u16 {
    8088
}

fn default_library_title() -> String {
    "AIS".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct AisCloudConfig {
    #[serde(default = "default_cloud_url")]
    pub base_url: String,
    /// Device token sent as the Authorization header
    pub token: Option<String>,
    #[serde(default = "default_true")]
    pub radio: bool,
    #[serde(default = "default_true")]
    pub podcast: bool,
    pub radio_title: Option<String>,
    pub podcast_title: Option<String>,
}

impl Default for AisCloudConfig {
    fn default() -> Self {
        Self {
            base_url: default_cloud_url(),
            token: None,
            radio: true,
            podcast: true,
            radio_title: None,
            podcast_title: None,
        }
    }
}

fn default_cloud_url() -> String {
    DEFAULT_CLOUD_URL.to_string()
}

#[derive(Debug, Deserialize)]
pub struct AudioBooksConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_audiobooks_url")]
    pub base_url: String,
    pub title: Option<String>,
}

impl Default for AudioBooksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_audiobooks_url(),
            title: None,
        }
    }
}

fn default_audiobooks_url() -> String {
    DEFAULT_AUDIOBOOKS_URL.to_string()
}

#[derive(Debug, Deserialize)]
pub struct TuneInConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_tunein_url")]
    pub root_url: String,
    pub title: Option<String>,
}

impl Default for TuneInConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root_url: default_tunein_url(),
            title: None,
        }
    }
}

fn default_tunein_url() -> String {
    DEFAULT_TUNEIN_URL.to_string()
}

/// Get config directory (AMB_CONFIG_DIR, XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("AMB_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR_NAME);
        }
    }

    // Fallback to current directory
    PathBuf::from(".")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("port", default_port() as i64)?
        // config.toml / config.json / config.yaml, whichever exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (AMB_FETCH_TIMEOUT_SECS, AMB_AIS_CLOUD__TOKEN, etc.)
        .add_source(
            ::config::Environment::with_prefix("AMB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    // Port precedence: AMB_PORT > PORT > config > default
    if let Ok(port) = std::env::var("AMB_PORT") {
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    } else if let Ok(port) = std::env::var("PORT") {
        // Container platforms hand the port over as PORT
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    }

    let config: Config = builder.build()?.try_deserialize()?;
    ensure!(
        config.fetch_timeout_secs > 0,
        "fetch_timeout_secs must be at least 1, got 0"
    );

    Ok(config)
}
