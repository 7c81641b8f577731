//! Game configuration

use std::fmt;

use crate::resolve::GravityPolicy;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_SIDE};

/// Whether rotate commands turn the falling block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    Enabled,
    /// Rotation index stays 0; rotate commands are no-ops
    #[default]
    Disabled,
}

impl RotationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enabled" | "on" | "1" | "true" => Some(RotationPolicy::Enabled),
            "disabled" | "off" | "0" | "false" => Some(RotationPolicy::Disabled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationPolicy::Enabled => "enabled",
            RotationPolicy::Disabled => "disabled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub rotation: RotationPolicy,
    pub gravity: GravityPolicy,
    /// Seed for the default random block source
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            rotation: RotationPolicy::default(),
            gravity: GravityPolicy::default(),
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_BOARD_SIDE).contains(&self.width) {
            return Err(ConfigError::WidthOutOfRange(self.width));
        }
        if !(1..=MAX_BOARD_SIDE).contains(&self.height) {
            return Err(ConfigError::HeightOutOfRange(self.height));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    WidthOutOfRange(u8),
    HeightOutOfRange(u8),
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::WidthOutOfRange(_) | ConfigError::HeightOutOfRange(_) => {
                "invalid_dimensions"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::WidthOutOfRange(_) => "board width must be between 1 and 64",
            ConfigError::HeightOutOfRange(_) => "board height must be between 1 and 64",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WidthOutOfRange(v) | ConfigError::HeightOutOfRange(v) => {
                write!(f, "{} (got {})", self.message(), v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
