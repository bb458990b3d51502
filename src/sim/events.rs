//! Gameplay events queued by the simulation for the host

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;

/// Sound effect identifiers understood by the audio sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player hopped a tile
    Hop,
    /// Player was hit by an obstacle
    Bonk,
    /// Goal lane reached
    GoalReached,
    /// Last life lost
    GameOver,
    /// Power-up picked up
    PowerUp,
}

/// Something that happened during a tick or input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hopped { points: u64 },
    PowerUpCollected { kind: PowerUpKind },
    /// Hit absorbed by the shield, no life lost
    ShieldAbsorbed,
    /// Hit with a life lost
    Bonked { lives_left: u8 },
    MultiplierExpired,
    /// Goal reached, `level` is the 0-based index just completed
    LevelComplete { level: usize, bonus: u64 },
    LevelStarted { level: usize },
    Won { score: u64 },
    GameOver { score: u64 },
    Paused,
    Resumed,
    Restarted,
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::Hopped { .. } => Some(SoundEffect::Hop),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::ShieldAbsorbed | GameEvent::Bonked { .. } => Some(SoundEffect::Bonk),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::GoalReached),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}
