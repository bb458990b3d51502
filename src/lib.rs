//! Bonk Crossing - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, obstacles, collisions, game state)
//! - `config`: Data-driven level table and grid layout
//! - `session`: Fixed-timestep frame driver that feeds the external sinks
//! - `frontend`: Render/audio/HUD sink traits and input events
//! - `assets`: Asset load tracking with placeholder fallback
//! - `audio`, `renderer`: Browser presentation (wasm32 only)

pub mod assets;
pub mod config;
pub mod frontend;
pub mod session;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use config::{ConfigError, GameConfig};
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Grid dimensions
    pub const TILE_SIZE: f32 = 40.0;
    pub const GRID_WIDTH: f32 = 400.0;
    pub const GRID_HEIGHT: f32 = 400.0;

    pub const START_LIVES: u8 = 3;

    /// Points per upward hop, before the multiplier
    pub const HOP_POINTS: u64 = 10;
    /// Points for reaching the goal lane, before the multiplier
    pub const GOAL_POINTS: u64 = 100;
    /// Score multiplier while double score is active
    pub const DOUBLE_SCORE_FACTOR: u64 = 2;

    /// Double score lasts this long (seconds of session time)
    pub const MULTIPLIER_DURATION_SECS: f64 = 10.0;
    /// Chance an eligible safe lane gets a power-up
    pub const POWER_UP_CHANCE: f32 = 0.7;
}
