use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::KeyCode;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::palette::ColorPalette;
use crate::error::{Error, Result};

/// Frames per second the game loop aims for. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Framerate(u32);

impl Framerate {
    pub fn new(fps: u32) -> Result<Self> {
        if fps == 0 {
            return Err(Error::InvalidArgument("framerate must be positive".into()));
        }
        Ok(Self(fps))
    }

    pub fn fps(&self) -> u32 {
        self.0
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.0
    }
}

impl Default for Framerate {
    fn default() -> Self {
        Self(30)
    }
}

impl TryFrom<u32> for Framerate {
    type Error = Error;

    fn try_from(fps: u32) -> Result<Self> {
        Self::new(fps)
    }
}

impl From<Framerate> for u32 {
    fn from(framerate: Framerate) -> Self {
        framerate.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub font_width: u16,
    pub font_height: u16,
    pub target_framerate: Framerate,
    pub color_palette: ColorPalette,
    /// Pressing this always stops the game.
    pub stop_game_key: KeyCode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            font_width: 8,
            font_height: 16,
            target_framerate: Framerate::default(),
            color_palette: ColorPalette::default(),
            stop_game_key: KeyCode::Esc,
        }
    }
}

impl GameConfig {
    /// Load the user's config, falling back to defaults.
    ///
    /// A missing file is normal; a malformed one is logged and ignored.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    warn!("invalid game config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("no game config at {}, using defaults", config_path.display());
                Self::default()
            }
        }
    }

    /// # Errors
    ///
    /// `Config` for malformed JSON, `InvalidArgument` for zero font metrics.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        if config.font_width == 0 || config.font_height == 0 {
            return Err(Error::InvalidArgument(format!(
                "font size must be positive, got {}x{}",
                config.font_width, config.font_height
            )));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("term-nexus");
        path.push("game.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn framerate_rejects_zero() {
        assert!(matches!(Framerate::new(0), Err(Error::InvalidArgument(_))));
        assert_eq!(
            Framerate::new(20).unwrap().frame_duration(),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::from_json(r#"{ "target_framerate": 60 }"#).unwrap();
        assert_eq!(config.target_framerate.fps(), 60);
        assert_eq!(config.stop_game_key, KeyCode::Esc);
        assert_eq!(config.color_palette, ColorPalette::default());
    }

    #[test]
    fn round_trips_through_json() {
        let config = GameConfig {
            stop_game_key: KeyCode::Char('q'),
            ..GameConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "target_framerate": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "font_width": 0 }"#),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn config_lives_under_dot_config() {
        assert!(GameConfig::config_path().ends_with(".config/term-nexus/game.json"));
    }
}
