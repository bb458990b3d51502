//! Fixed timestep simulation tick and discrete input handling
//!
//! `tick` runs once per rendered frame while the game is active. Inputs are
//! applied between ticks, never mid-tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{TickOutcome, resolve_tick};
use super::events::GameEvent;
use super::level::{LevelOutcome, initialize_level};
use super::motion::advance_lanes;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Discrete commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TogglePause,
    Restart,
}

impl InputEvent {
    /// Tile offset for movement commands
    pub fn step(&self) -> Option<(i32, i32)> {
        match self {
            InputEvent::MoveUp => Some((0, -1)),
            InputEvent::MoveDown => Some((0, 1)),
            InputEvent::MoveLeft => Some((-1, 0)),
            InputEvent::MoveRight => Some((1, 0)),
            InputEvent::TogglePause | InputEvent::Restart => None,
        }
    }
}

/// Advance the game state by one fixed timestep.
///
/// Returns `None` without touching anything unless the game is active.
pub fn tick(state: &mut GameState, dt: f32) -> Option<TickOutcome> {
    if state.phase != GamePhase::Active {
        return None;
    }

    state.time_ticks += 1;
    state.clock += dt as f64;
    state.expire_multiplier();

    advance_lanes(&mut state.lanes, state.config.grid.width);

    Some(resolve_tick(state))
}

/// Apply one input event. Returns false if the event was ignored in this phase.
pub fn apply_input<R: Rng + ?Sized>(state: &mut GameState, input: InputEvent, rng: &mut R) -> bool {
    match (state.phase, input) {
        (GamePhase::Active, InputEvent::TogglePause) => {
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
            true
        }
        (GamePhase::Paused, InputEvent::TogglePause) => {
            state.phase = GamePhase::Active;
            state.push_event(GameEvent::Resumed);
            true
        }
        (GamePhase::GameOver | GamePhase::Won, InputEvent::Restart) => {
            restart(state, rng);
            true
        }
        (GamePhase::Active, _) => match input.step() {
            Some((dx, dy)) => {
                move_player(state, dx, dy, rng);
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Step the player one tile, score upward progress, and check the goal
pub fn move_player<R: Rng + ?Sized>(state: &mut GameState, dx: i32, dy: i32, rng: &mut R) {
    state.expire_multiplier();

    let grid = state.config.grid;
    let old = state.player.pos;
    let max_x = grid.width - state.player.width;
    let max_y = grid.height - state.player.height;

    state.player.pos.x = (old.x + dx as f32 * grid.tile_size).clamp(0.0, max_x);
    state.player.pos.y = (old.y + dy as f32 * grid.tile_size).clamp(0.0, max_y);

    if state.player.pos == old {
        return;
    }

    let points = if state.player.pos.y < old.y {
        state.award(HOP_POINTS)
    } else {
        0
    };
    state.push_event(GameEvent::Hopped { points });

    if state.player.pos.y <= 0.0 {
        reach_goal(state, rng);
    }
}

/// Goal bonus, then the next level or the win
fn reach_goal<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let bonus = state.award(GOAL_POINTS);
    let level = state.level_index;
    state.push_event(GameEvent::LevelComplete { level, bonus });

    match initialize_level(state, level + 1, rng) {
        LevelOutcome::Started { level } => {
            log::info!("Level {} reached, score {}", level + 1, state.score);
        }
        LevelOutcome::Won => state.multiplier_timer.cancel(),
    }
}

/// Full reset to level 0 with fresh lives and score
pub fn restart<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let pending = state.drain_events();
    let config = state.config.clone();
    *state = GameState::fresh(config, rng);

    let fresh = state.drain_events();
    for event in pending {
        state.push_event(event);
    }
    state.push_event(GameEvent::Restarted);
    for event in fresh {
        state.push_event(event);
    }
    log::info!("Game restarted");
}
