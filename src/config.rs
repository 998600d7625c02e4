use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::track::{TrackError, TrackParams, DEFAULT_HORIZON_MARGIN_RAD};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("track settings: {0}")]
    Track(#[from] TrackError),
    #[error("globe settings: {0}")]
    Globe(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub track: TrackParams,
    #[serde(default)]
    pub globe: GlobeConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub satellites: PathBuf,
    pub launch_sites: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobeConfig {
    #[serde(default = "default_viewport")]
    pub width: f64,
    #[serde(default = "default_viewport")]
    pub height: f64,
    #[serde(default = "default_horizon_margin")]
    pub horizon_margin: f64,
    #[serde(
        default = "default_fly_to_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub fly_to_duration: Duration,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            width: default_viewport(),
            height: default_viewport(),
            horizon_margin: default_horizon_margin(),
            fly_to_duration: default_fly_to_duration(),
        }
    }
}

fn default_viewport() -> f64 {
    960.0
}

fn default_horizon_margin() -> f64 {
    DEFAULT_HORIZON_MARGIN_RAD
}

fn default_fly_to_duration() -> Duration {
    Duration::from_millis(1500)
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.track.validate()?;
        let globe = &self.globe;
        if !(globe.width > 0.0 && globe.height > 0.0) {
            return Err(ConfigError::Globe("viewport must be positive".into()));
        }
        if !(0.0..std::f64::consts::FRAC_PI_2).contains(&globe.horizon_margin) {
            return Err(ConfigError::Globe(
                "horizon_margin must be within [0, pi/2) radians".into(),
            ));
        }
        Ok(())
    }
}
