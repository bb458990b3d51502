//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only (level generation)
//! - Stable iteration order (lanes top to bottom, obstacles in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod grid;
pub mod level;
pub mod motion;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Hit, TickOutcome, resolve_obstacles, resolve_power_ups, resolve_tick};
pub use events::{GameEvent, SoundEffect};
pub use grid::{Direction, Lane, LaneKind, Rect, lane_at, overlaps};
pub use level::{LevelDefinition, LevelOutcome, default_levels, initialize_level};
pub use motion::{advance, advance_lanes};
pub use state::{
    GamePhase, GameState, Obstacle, ObstacleKind, Player, PowerUp, PowerUpKind,
};
pub use tick::{InputEvent, apply_input, move_player, restart, tick};
pub use timer::{ExpiryTimer, TimerHandle};
