//! Session configuration read from the environment

use std::env;

use led_tetris_core::{GameConfig, GravityPolicy, RotationPolicy};

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub game: GameConfig,
    /// Start playing as soon as the session opens
    pub autostart: bool,
    /// Push an observation after every state change, not only on `observe`
    pub stream: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            autostart: false,
            stream: true,
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse `key`, falling back to `default` with a warning when the value is bad
fn parse_or<T, F>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T, parse: F) -> T
where
    F: Fn(&str) -> Option<T>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    match parse(trimmed) {
        Some(value) => value,
        None => {
            log::warn!("ignoring {}={:?}: unrecognized value", key, raw);
            default
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// | Variable | Values | Default |
    /// |----------|--------|---------|
    /// | `LED_TETRIS_SEED` | u32 | 1 |
    /// | `LED_TETRIS_WIDTH` | 1-64 | 10 |
    /// | `LED_TETRIS_HEIGHT` | 1-64 | 20 |
    /// | `LED_TETRIS_ROTATION` | enabled, disabled | disabled |
    /// | `LED_TETRIS_GRAVITY` | after-clear, every-commit | every-commit |
    /// | `LED_TETRIS_AUTOSTART` | 1, true, 0, false | false |
    /// | `LED_TETRIS_STREAM` | 1, true, 0, false | true |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut game = GameConfig {
            seed: parse_or(&lookup, "LED_TETRIS_SEED", defaults.game.seed, |s| s.parse().ok()),
            width: parse_or(&lookup, "LED_TETRIS_WIDTH", defaults.game.width, |s| s.parse().ok()),
            height: parse_or(&lookup, "LED_TETRIS_HEIGHT", defaults.game.height, |s| {
                s.parse().ok()
            }),
            rotation: parse_or(
                &lookup,
                "LED_TETRIS_ROTATION",
                defaults.game.rotation,
                RotationPolicy::from_str,
            ),
            gravity: parse_or(
                &lookup,
                "LED_TETRIS_GRAVITY",
                defaults.game.gravity,
                GravityPolicy::from_str,
            ),
        };

        if let Err(err) = game.validate() {
            log::warn!("{}; using {}x{}", err, defaults.game.width, defaults.game.height);
            game.width = defaults.game.width;
            game.height = defaults.game.height;
        }

        Self {
            game,
            autostart: parse_or(&lookup, "LED_TETRIS_AUTOSTART", defaults.autostart, parse_flag),
            stream: parse_or(&lookup, "LED_TETRIS_STREAM", defaults.stream, parse_flag),
        }
    }
}
