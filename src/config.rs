//! Startup configuration. Fixed once the game is running.

use serde::Deserialize;

use crate::error::GameError;

/// Player rectangle and movement constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    /// Horizontal pixels per frame while a direction is held
    pub speed: f64,
    /// Upward velocity applied when a jump starts
    pub jump_impulse: f64,
    /// Added to vertical velocity every frame
    pub gravity: f64,
    pub health: u32,
    /// Any CSS color string
    pub color: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            speed: 5.0,
            jump_impulse: 15.0,
            gravity: 1.0,
            health: 100,
            color: "red".to_string(),
        }
    }
}

/// DOM element ids the browser build looks up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub health: String,
    pub tutorial: String,
    pub left_button: String,
    pub right_button: String,
    pub jump_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "gameCanvas".to_string(),
            health: "health".to_string(),
            tutorial: "tutorial".to_string(),
            left_button: "left-btn".to_string(),
            right_button: "right-btn".to_string(),
            jump_button: "jump-btn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub spawn_x: f64,
    pub tutorial_hide_ms: u32,
    /// Persistent key marking that the tutorial has been shown once
    pub visited_key: String,
    pub elements: ElementIds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            spawn_x: 50.0,
            tutorial_hide_ms: 5000,
            visited_key: "visited".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like [`GameConfig::from_json`], but blank input means "all defaults".
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, GameError> {
        match json.map(str::trim) {
            Some(s) if !s.is_empty() => Self::from_json(s),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_player() {
        let config = GameConfig::default();
        assert_eq!(config.player.speed, 5.0);
        assert_eq!(config.player.jump_impulse, 15.0);
        assert_eq!(config.player.gravity, 1.0);
        assert_eq!(config.spawn_x, 50.0);
        assert_eq!(config.tutorial_hide_ms, 5000);
        assert_eq!(config.elements.canvas, "gameCanvas");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "player": { "speed": 8 }, "visited_key": "seen" }"#)
            .expect("valid json");
        assert_eq!(config.player.speed, 8.0);
        assert_eq!(config.player.width, 50.0);
        assert_eq!(config.visited_key, "seen");
        assert_eq!(config.elements.jump_button, "jump-btn");
    }

    #[test]
    fn blank_or_missing_json_is_default() {
        assert_eq!(GameConfig::from_optional_json(None).unwrap(), GameConfig::default());
        assert_eq!(GameConfig::from_optional_json(Some("  ")).unwrap(), GameConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Config(_)), "got {err:?}");
    }
}
