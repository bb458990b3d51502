//! Level table and level generation
//!
//! The only place randomness enters the simulation. Callers pass the RNG in,
//! so a seeded `Pcg32` reproduces a level exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::grid::{Lane, LaneKind};
use super::state::{GamePhase, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::config::GameConfig;

/// Difficulty settings for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// 1-based, for display
    pub level_number: u32,
    /// Scales every road lane's base speed
    pub speed_multiplier: f32,
    /// Obstacles per road lane, inclusive range
    pub min_obstacles: u32,
    pub max_obstacles: u32,
}

impl LevelDefinition {
    pub const fn new(level_number: u32, speed_multiplier: f32, min: u32, max: u32) -> Self {
        Self {
            level_number,
            speed_multiplier,
            min_obstacles: min,
            max_obstacles: max,
        }
    }
}

/// Default five-level progression
pub fn default_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition::new(1, 1.0, 2, 4),
        LevelDefinition::new(2, 1.25, 2, 4),
        LevelDefinition::new(3, 1.5, 3, 4),
        LevelDefinition::new(4, 1.75, 3, 5),
        LevelDefinition::new(5, 2.0, 4, 5),
    ]
}

/// Result of trying to start a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Started { level: usize },
    /// Index past the table: the run is won
    Won,
}

/// Clone the lane template with speeds for the given level, no obstacles
pub fn build_lanes(config: &GameConfig, level_index: usize) -> Vec<Lane> {
    let tile = config.grid.tile_size;
    let multiplier = config
        .levels
        .get(level_index)
        .map_or(1.0, |level| level.speed_multiplier);

    config
        .lanes
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let mut lane = Lane::new(index, tile, kind.clone());
            if let LaneKind::Road { base_speed, .. } = kind {
                lane.speed = base_speed * multiplier;
            }
            lane
        })
        .collect()
}

/// Set up `level_index`: fresh lanes, obstacles, power-ups, player on start.
///
/// An index past the last level moves the game to `Won` instead.
pub fn initialize_level<R: Rng + ?Sized>(
    state: &mut GameState,
    level_index: usize,
    rng: &mut R,
) -> LevelOutcome {
    let Some(level) = state.config.levels.get(level_index).copied() else {
        state.phase = GamePhase::Won;
        log::info!("All levels cleared, final score {}", state.score);
        state.push_event(GameEvent::Won { score: state.score });
        return LevelOutcome::Won;
    };

    let tile = state.config.grid.tile_size;
    let grid_width = state.config.grid.width;

    let mut lanes = build_lanes(&state.config, level_index);
    for lane in lanes.iter_mut().filter(|lane| lane.is_road()) {
        let count = rng.random_range(level.min_obstacles..=level.max_obstacles);
        for _ in 0..count {
            let width = tile * rng.random_range(1..=2u32) as f32;
            let x = rng.random_range(0.0..grid_width);
            let kind = ObstacleKind::from_roll(rng.random::<f32>());
            lane.obstacles.push(Obstacle {
                lane_index: lane.index,
                x,
                y: lane.y,
                width,
                height: tile,
                speed: lane.speed,
                kind,
            });
        }
    }

    let mut power_ups = Vec::new();
    if state.config.power_ups {
        let last = lanes.len().saturating_sub(1);
        let max_x = (grid_width - tile).max(0.0);
        for lane in lanes.iter().filter(|lane| lane.index != 0 && lane.index != last) {
            if lane.is_road() || !rng.random_bool(state.config.power_up_chance as f64) {
                continue;
            }
            let kind = if rng.random_bool(0.5) {
                PowerUpKind::Shield
            } else {
                PowerUpKind::DoubleScore
            };
            let x = if max_x > 0.0 {
                rng.random_range(0.0..max_x)
            } else {
                0.0
            };
            power_ups.push(PowerUp::new(kind, Vec2::new(x, lane.y), tile));
        }
    }

    log::info!(
        "Level {} (x{:.2} speed): {} obstacles, {} power-ups",
        level.level_number,
        level.speed_multiplier,
        lanes.iter().map(|lane| lane.obstacles.len()).sum::<usize>(),
        power_ups.len()
    );

    state.level_index = level_index;
    state.lanes = lanes;
    state.power_ups = power_ups;
    state.reset_player_position();
    state.push_event(GameEvent::LevelStarted { level: level_index });

    LevelOutcome::Started { level: level_index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_counts_within_range() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for level_index in 0..config.levels.len() {
            let mut state = GameState::with_layout(config.clone());
            initialize_level(&mut state, level_index, &mut rng);
            let level = config.levels[level_index];
            for lane in state.lanes.iter().filter(|l| l.is_road()) {
                let n = lane.obstacles.len() as u32;
                assert!(n >= level.min_obstacles && n <= level.max_obstacles);
            }
        }
    }

    #[test]
    fn test_obstacles_sized_and_placed() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let state = GameState::new(config.clone(), &mut rng).unwrap();
        let tile = config.grid.tile_size;
        for lane in &state.lanes {
            for obstacle in &lane.obstacles {
                assert!(obstacle.width == tile || obstacle.width == 2.0 * tile);
                assert!(obstacle.x >= 0.0 && obstacle.x < config.grid.width);
                assert_eq!(obstacle.y, lane.y);
                assert_eq!(obstacle.speed, lane.speed);
            }
        }
    }

    #[test]
    fn test_speed_scales_with_level() {
        let config = GameConfig::default();
        let base = build_lanes(&config, 0);
        let fast = build_lanes(&config, 4);
        for (slow, quick) in base.iter().zip(&fast).filter(|(l, _)| l.is_road()) {
            assert!((quick.speed - slow.speed * 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_power_ups_only_on_inner_safe_lanes() {
        let config = GameConfig::default();
        let last_y = config.start_position().y;
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let state = GameState::new(config.clone(), &mut rng).unwrap();
            for power_up in &state.power_ups {
                assert!(power_up.pos.y > 0.0 && power_up.pos.y < last_y);
                let lane = crate::sim::grid::lane_at(&state.lanes, power_up.pos.y, 40.0);
                assert!(lane.is_some_and(|l| !l.is_road()));
                assert!(!power_up.collected);
            }
        }
    }

    #[test]
    fn test_classic_has_no_power_ups() {
        let mut rng = Pcg32::seed_from_u64(3);
        let state = GameState::new(GameConfig::classic(), &mut rng).unwrap();
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_past_last_level_wins() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(config.clone(), &mut rng).unwrap();
        let outcome = initialize_level(&mut state, config.levels.len(), &mut rng);
        assert_eq!(outcome, LevelOutcome::Won);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_same_seed_same_level() {
        let config = GameConfig::default();
        let a = GameState::new(config.clone(), &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = GameState::new(config, &mut Pcg32::seed_from_u64(42)).unwrap();
        for (la, lb) in a.lanes.iter().zip(&b.lanes) {
            let xa: Vec<f32> = la.obstacles.iter().map(|o| o.x).collect();
            let xb: Vec<f32> = lb.obstacles.iter().map(|o| o.x).collect();
            assert_eq!(xa, xb);
        }
        assert_eq!(a.power_ups.len(), b.power_ups.len());
    }
}
