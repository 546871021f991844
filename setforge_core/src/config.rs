//! Configuration file support for Setforge.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/setforge/config.toml`.
//! Every knob has a default, so a missing or partial file is fine.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,

    #[serde(default)]
    pub recovery: RecoveryConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,
}

/// Movement sampling configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum movements per pattern across a session's sampled main
    /// work. Soft: a slot whose pattern the template declares still fills.
    #[serde(default = "default_pattern_cap")]
    pub pattern_cap: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            pattern_cap: default_pattern_cap(),
        }
    }
}

/// Warm-up/cool-down planning configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Warm-up target minutes at or above which an activation movement
    /// is included.
    #[serde(default = "default_activation_min_minutes")]
    pub activation_min_minutes: u32,

    /// Warm-up target minutes at or above which a dynamic-flow movement
    /// is included.
    #[serde(default = "default_flow_min_minutes")]
    pub flow_min_minutes: u32,

    /// Intensity at or above which the session gets an extended cool-down.
    #[serde(default = "default_extended_cooldown_intensity")]
    pub extended_cooldown_intensity: u8,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            activation_min_minutes: default_activation_min_minutes(),
            flow_min_minutes: default_flow_min_minutes(),
            extended_cooldown_intensity: default_extended_cooldown_intensity(),
        }
    }
}

/// Progression analysis configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Intensity at or above which a session counts as "high intensity"
    /// for fatigue tracking.
    #[serde(default = "default_high_intensity_threshold")]
    pub high_intensity_threshold: f64,

    /// Consecutive high-intensity sessions that trigger a deload.
    #[serde(default = "default_deload_trigger_sessions")]
    pub deload_trigger_sessions: u32,

    /// How far back history is considered, in days.
    #[serde(default = "default_history_window_days")]
    pub history_window_days: i64,

    /// Window for the phase-classification intensity average, in days.
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: i64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            high_intensity_threshold: default_high_intensity_threshold(),
            deload_trigger_sessions: default_deload_trigger_sessions(),
            history_window_days: default_history_window_days(),
            trend_window_days: default_trend_window_days(),
        }
    }
}

// Default value functions
fn default_pattern_cap() -> u32 {
    2
}

fn default_activation_min_minutes() -> u32 {
    8
}

fn default_flow_min_minutes() -> u32 {
    10
}

fn default_extended_cooldown_intensity() -> u8 {
    7
}

fn default_high_intensity_threshold() -> f64 {
    7.0
}

fn default_deload_trigger_sessions() -> u32 {
    4
}

fn default_history_window_days() -> i64 {
    28
}

fn default_trend_window_days() -> i64 {
    14
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
        base.join("setforge").join("config.toml")
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.sampling.pattern_cap == 0 {
            return Err(Error::Config(
                "sampling.pattern_cap must be at least 1".to_string(),
            ));
        }
        if self.progression.deload_trigger_sessions == 0 {
            return Err(Error::Config(
                "progression.deload_trigger_sessions must be at least 1".to_string(),
            ));
        }
        if self.progression.history_window_days <= 0 {
            return Err(Error::Config(
                "progression.history_window_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sampling.pattern_cap, 2);
        assert_eq!(config.recovery.extended_cooldown_intensity, 7);
        assert_eq!(config.progression.deload_trigger_sessions, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.sampling.pattern_cap, parsed.sampling.pattern_cap);
        assert_eq!(
            config.progression.history_window_days,
            parsed.progression.history_window_days
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[sampling]
pattern_cap = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sampling.pattern_cap, 3);
        assert_eq!(config.recovery.flow_min_minutes, 10); // default
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config: Config = toml::from_str("[sampling]\npattern_cap = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sampling.pattern_cap = 4;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sampling.pattern_cap, 4);
    }
}
