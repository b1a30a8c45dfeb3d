//! Swipe configuration.
//!
//! Loaded from `~/.swipe/config.toml` or an explicit path. Every key is
//! optional; a missing file yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Swipe configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Gesture classification thresholds.
    pub thresholds: Thresholds,

    /// How many committed decisions can be rewound.
    pub history_capacity: usize,

    /// How many candidates to request when the deck runs dry.
    pub prefetch: usize,

    /// Where sessions live. Defaults to `~/.swipe/sessions/`.
    pub storage_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            history_capacity: 10,
            prefetch: 10,
            storage_root: None,
        }
    }
}

/// Gesture thresholds. Offsets are screen fractions, velocities pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Thresholds {
    /// Displacement on either axis past which the provisional direction is re-derived.
    pub activation: f64,

    /// Horizontal displacement for a provisional left/right.
    pub provisional_x: f64,

    /// Upward displacement for a provisional super-like.
    pub provisional_up: f64,

    /// Horizontal displacement that commits on release.
    pub commit_x: f64,

    /// Upward displacement that commits on release.
    pub commit_up: f64,

    /// Horizontal release speed that commits regardless of displacement.
    pub fling_velocity: f64,

    /// Minimum offset change before a state-change notification goes out.
    pub notify_epsilon: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            activation: 0.08,
            provisional_x: 0.15,
            provisional_up: 0.15,
            commit_x: 0.35,
            commit_up: 0.25,
            fling_velocity: 500.0,
            notify_epsilon: 0.01,
        }
    }
}

impl Thresholds {
    /// Checks that every threshold is positive and finite, and that
    /// provisional detection activates no later than it can classify.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("activation", self.activation),
            ("provisional-x", self.provisional_x),
            ("provisional-up", self.provisional_up),
            ("commit-x", self.commit_x),
            ("commit-up", self.commit_up),
            ("fling-velocity", self.fling_velocity),
            ("notify-epsilon", self.notify_epsilon),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "thresholds.{name} must be positive, got {value}"
                )));
            }
        }
        if self.activation > self.provisional_x || self.activation > self.provisional_up {
            return Err(ConfigError::Invalid(
                "thresholds.activation must not exceed provisional-x or provisional-up".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load config from the default path, falling back to defaults if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "history-capacity must be at least 1".into(),
            ));
        }
        if self.prefetch == 0 {
            return Err(ConfigError::Invalid("prefetch must be at least 1".into()));
        }
        Ok(())
    }

    /// The config file path: `~/.swipe/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".swipe").join("config.toml"))
    }

    /// The session storage root: configured, or `~/.swipe/sessions/`.
    pub fn storage_root(&self) -> Option<PathBuf> {
        self.storage_root
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".swipe").join("sessions")))
    }
}
