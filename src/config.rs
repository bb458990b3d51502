//! Game configuration: grid, lane template, level table
//!
//! The game's variants (single-level classic, multi-level with power-ups)
//! are just different configs. Configs are validated once at load; the
//! simulation assumes a valid one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid::{Direction, LaneKind};
use crate::sim::level::{LevelDefinition, default_levels};

/// Errors from loading or validating a config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
    #[error("Grid {width}x{height} does not fit {lanes} lanes of {tile}px (need at least 2 lanes, height = lanes * tile, width >= tile)")]
    GridMismatch {
        width: f32,
        height: f32,
        lanes: usize,
        tile: f32,
    },
    #[error("Goal lane (top) must be a safe lane")]
    GoalLaneNotSafe,
    #[error("Start lane (bottom) must be a safe lane")]
    StartLaneNotSafe,
    #[error("Road lane {lane} has invalid base speed {value}")]
    InvalidRoadSpeed { lane: usize, value: f32 },
    #[error("No levels defined")]
    NoLevels,
    #[error("Level {level}: min obstacles {min} exceeds max {max}")]
    InvalidObstacleRange { level: u32, min: u32, max: u32 },
    #[error("Level {level}: speed multiplier must be positive and finite, got {value}")]
    InvalidSpeedMultiplier { level: u32, value: f32 },
    #[error("Power-up chance must be within 0..=1, got {0}")]
    InvalidPowerUpChance(f32),
    #[error("Multiplier duration must be positive, got {0}s")]
    InvalidMultiplierDuration(f64),
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub tile_size: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }
}

/// Everything that distinguishes one variant of the game from another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    /// Lane template, top (goal) to bottom (start)
    pub lanes: Vec<LaneKind>,
    /// Ordered level table; reaching the goal on the last one wins
    pub levels: Vec<LevelDefinition>,
    /// Spawn power-ups on inner safe lanes
    pub power_ups: bool,
    pub power_up_chance: f32,
    pub multiplier_duration_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            lanes: default_lanes(),
            levels: default_levels(),
            power_ups: true,
            power_up_chance: POWER_UP_CHANCE,
            multiplier_duration_secs: MULTIPLIER_DURATION_SECS,
        }
    }
}

/// The ten-lane layout: goal, two roads, safe, two roads, safe, two roads, start
pub fn default_lanes() -> Vec<LaneKind> {
    vec![
        LaneKind::safe("#66CDAA"),
        LaneKind::road(Direction::Left, 2.5),
        LaneKind::road(Direction::Right, 1.8),
        LaneKind::safe("#7CFC00"),
        LaneKind::road(Direction::Left, 1.5),
        LaneKind::road(Direction::Right, 2.2),
        LaneKind::safe("#A9A9A9"),
        LaneKind::road(Direction::Left, 1.2),
        LaneKind::road(Direction::Right, 2.8),
        LaneKind::safe("#556B2F"),
    ]
}

impl GameConfig {
    /// Single level, no power-ups: the first goal wins the game
    pub fn classic() -> Self {
        Self {
            levels: vec![LevelDefinition::new(1, 1.0, 2, 4)],
            power_ups: false,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject layouts and level tables the simulation can't run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridConfig {
            tile_size,
            width,
            height,
        } = self.grid;

        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(tile_size));
        }

        let lanes = self.lanes.len();
        let fits = lanes >= 2
            && width.is_finite()
            && width >= tile_size
            && (height - lanes as f32 * tile_size).abs() < f32::EPSILON * height.max(1.0);
        if !fits {
            return Err(ConfigError::GridMismatch {
                width,
                height,
                lanes,
                tile: tile_size,
            });
        }

        if self.lanes.first().is_some_and(LaneKind::is_road) {
            return Err(ConfigError::GoalLaneNotSafe);
        }
        if self.lanes.last().is_some_and(LaneKind::is_road) {
            return Err(ConfigError::StartLaneNotSafe);
        }

        for (lane, kind) in self.lanes.iter().enumerate() {
            if let LaneKind::Road { base_speed, .. } = *kind {
                if !(base_speed.is_finite() && base_speed > 0.0) {
                    return Err(ConfigError::InvalidRoadSpeed {
                        lane,
                        value: base_speed,
                    });
                }
            }
        }

        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for level in &self.levels {
            if level.min_obstacles > level.max_obstacles {
                return Err(ConfigError::InvalidObstacleRange {
                    level: level.level_number,
                    min: level.min_obstacles,
                    max: level.max_obstacles,
                });
            }
            if !(level.speed_multiplier.is_finite() && level.speed_multiplier > 0.0) {
                return Err(ConfigError::InvalidSpeedMultiplier {
                    level: level.level_number,
                    value: level.speed_multiplier,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(ConfigError::InvalidPowerUpChance(self.power_up_chance));
        }
        if !(self.multiplier_duration_secs.is_finite() && self.multiplier_duration_secs > 0.0) {
            return Err(ConfigError::InvalidMultiplierDuration(
                self.multiplier_duration_secs,
            ));
        }

        Ok(())
    }

    /// Bottom lane, horizontally centred
    pub fn start_position(&self) -> Vec2 {
        let tile = self.grid.tile_size;
        Vec2::new(self.grid.width / 2.0 - tile / 2.0, self.grid.height - tile)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
