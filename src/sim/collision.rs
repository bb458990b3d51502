//! Per-tick collision resolution
//!
//! Power-ups are checked before obstacles, so a shield picked up this tick
//! already protects against a hit in the same tick.

use super::events::GameEvent;
use super::grid::{lane_at, overlaps};
use super::state::{GamePhase, GameState, PowerUpKind};

/// What an obstacle hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Shield consumed, no life lost
    Absorbed,
    /// One life lost, lives remain
    LifeLost { lives_left: u8 },
    /// Last life lost
    Fatal,
}

/// Result of resolving one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Power-ups picked up this tick, in scan order
    pub collected: Vec<PowerUpKind>,
    pub hit: Option<Hit>,
}

/// Collect every uncollected power-up under the player
pub fn resolve_power_ups(state: &mut GameState) -> Vec<PowerUpKind> {
    let player_box = state.player.bounds();
    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut() {
        if !power_up.collected && overlaps(&player_box, &power_up.bounds()) {
            power_up.collected = true;
            collected.push(power_up.kind);
        }
    }

    for &kind in &collected {
        match kind {
            PowerUpKind::Shield => {
                state.player.shielded = true;
            }
            PowerUpKind::DoubleScore => {
                state.activate_multiplier();
            }
        }
        log::debug!("Collected {:?} at t={:.2}s", kind, state.clock);
        state.push_event(GameEvent::PowerUpCollected { kind });
    }
    collected
}

/// Check the player's lane for a hit. Only the first overlapping obstacle counts.
pub fn resolve_obstacles(state: &mut GameState) -> Option<Hit> {
    let player_box = state.player.bounds();
    let tile = state.config.grid.tile_size;
    let lane = lane_at(&state.lanes, state.player.pos.y, tile)?;
    if !lane.is_road() {
        return None;
    }
    lane.obstacles
        .iter()
        .find(|obstacle| overlaps(&player_box, &obstacle.bounds()))?;

    state.reset_player_position();

    if state.player.shielded {
        state.player.shielded = false;
        log::debug!("Shield absorbed a hit");
        state.push_event(GameEvent::ShieldAbsorbed);
        return Some(Hit::Absorbed);
    }

    state.lives = state.lives.saturating_sub(1);
    state.push_event(GameEvent::Bonked {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.multiplier_timer.cancel();
        log::info!("Game over, final score {}", state.score);
        state.push_event(GameEvent::GameOver { score: state.score });
        return Some(Hit::Fatal);
    }

    Some(Hit::LifeLost {
        lives_left: state.lives,
    })
}

/// Power-ups, then obstacles
pub fn resolve_tick(state: &mut GameState) -> TickOutcome {
    let collected = resolve_power_ups(state);
    let hit = resolve_obstacles(state);
    TickOutcome { collected, hit }
}
