//! Data-driven game balance
//!
//! Defaults mirror `consts`. Tuning can be overridden from a JSON file; any
//! field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Logical screen size in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Pipe geometry used by the obstacle generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeTuning {
    pub width: f32,
    /// Vertical opening between top and bottom pipe
    pub gap: f32,
    /// Lower bound of the random top-pipe lift
    pub min_top: i32,
    /// Upper bound is `viewport.height - bottom_margin`
    pub bottom_margin: i32,
}

impl Default for PipeTuning {
    fn default() -> Self {
        Self {
            width: PIPE_WIDTH,
            gap: PIPE_GAP,
            min_top: PIPE_MIN_TOP,
            bottom_margin: PIPE_BOTTOM_MARGIN,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport: Viewport,
    /// Velocity assigned to the bird on each press
    pub flap_velocity: Vec2,
    pub gravity: Vec2,
    pub bird_start: Vec2,
    pub bird_size: f32,
    pub floor_height: f32,
    pub obstacle_pairs: usize,
    pub score_line_x: f32,
    pub recycle_line_x: f32,
    pub scroll_speed: f32,
    /// X offset of every pair after the first, as a fraction of viewport width
    pub pair_spacing: f32,
    pub pipes: PipeTuning,
    /// Obstacle RNG seed
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            flap_velocity: Vec2::new(0.0, FLAP_VELOCITY_Y),
            gravity: Vec2::new(0.0, GRAVITY_Y),
            bird_start: Vec2::new(BIRD_START_X, BIRD_START_Y),
            bird_size: BIRD_SIZE,
            floor_height: FLOOR_HEIGHT,
            obstacle_pairs: OBSTACLE_PAIRS,
            score_line_x: SCORE_LINE_X,
            recycle_line_x: RECYCLE_LINE_X,
            scroll_speed: SCROLL_SPEED,
            pair_spacing: SECOND_PAIR_OFFSET,
            pipes: PipeTuning::default(),
            seed: 0x5EED,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Viewport { width, height } = self.viewport;
        if !(positive(width) && positive(height)) {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {width}x{height}"
            )));
        }
        if self.obstacle_pairs == 0 {
            return Err(ConfigError::Invalid("obstacle_pairs must be at least 1".into()));
        }
        if !(positive(self.pipes.width) && positive(self.pipes.gap)) {
            return Err(ConfigError::Invalid("pipe width and gap must be positive".into()));
        }
        if !positive(self.bird_size) {
            return Err(ConfigError::Invalid("bird_size must be positive".into()));
        }
        if !(self.floor_height >= 0.0 && self.scroll_speed >= 0.0) {
            return Err(ConfigError::Invalid(
                "floor_height and scroll_speed must not be negative".into(),
            ));
        }
        let knobs = [
            self.bird_start.x,
            self.bird_start.y,
            self.floor_height,
            self.flap_velocity.x,
            self.flap_velocity.y,
            self.gravity.x,
            self.gravity.y,
            self.score_line_x,
            self.recycle_line_x,
            self.scroll_speed,
            self.pair_spacing,
        ];
        if knobs.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("tuning values must be finite".into()));
        }
        Ok(())
    }
}

/// Finite and strictly greater than zero; NaN fails
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.flap_velocity, Vec2::new(0.0, -4.0));
        assert_eq!(tuning.score_line_x, 50.0);
        assert_eq!(tuning.scroll_speed, 3.0);
        assert_eq!(tuning.obstacle_pairs, 2);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "scroll_speed": 5.0, "viewport": { "width": 360.0, "height": 640.0 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.scroll_speed, 5.0);
        assert_eq!(tuning.viewport.width, 360.0);
        assert_eq!(tuning.obstacle_pairs, OBSTACLE_PAIRS);
        assert_eq!(tuning.pipes, PipeTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            obstacle_pairs: 3,
            seed: 42,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_zero_pairs() {
        let err = Tuning::from_json(r#"{ "obstacle_pairs": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let tuning = Tuning {
            viewport: Viewport {
                width: 0.0,
                height: 800.0,
            },
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_sizes() {
        let pipes = PipeTuning {
            width: f32::NAN,
            ..Default::default()
        };
        let bad = [
            Tuning {
                pipes,
                ..Default::default()
            },
            Tuning {
                bird_size: f32::NAN,
                ..Default::default()
            },
            Tuning {
                bird_start: Vec2::new(50.0, f32::NAN),
                ..Default::default()
            },
            Tuning {
                floor_height: f32::INFINITY,
                ..Default::default()
            },
        ];
        for tuning in bad {
            assert!(
                matches!(tuning.validate(), Err(ConfigError::Invalid(_))),
                "accepted {tuning:?}"
            );
        }
    }

    #[test]
    fn test_rejects_negative_scroll() {
        let tuning = Tuning {
            scroll_speed: -3.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
        let tuning = Tuning {
            scroll_speed: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/floppy-tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
