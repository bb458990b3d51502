//! Seams between the simulation and whatever presents it
//!
//! The browser build implements these with Canvas 2D, DOM text and Web Audio;
//! tests and the native demo use recording or logging implementations.

use serde::Serialize;

use crate::sim::{GamePhase, GameState, Lane, Player, PowerUp, SoundEffect};

pub use crate::sim::InputEvent;

/// Entities to draw this frame, borrowed from the game state
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameSnapshot<'a> {
    pub lanes: &'a [Lane],
    pub player: &'a Player,
    pub power_ups: &'a [PowerUp],
    pub grid_width: f32,
    pub grid_height: f32,
    pub tile_size: f32,
}

impl<'a> FrameSnapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            lanes: &state.lanes,
            player: &state.player,
            power_ups: &state.power_ups,
            grid_width: state.config.grid.width,
            grid_height: state.config.grid.height,
            tile_size: state.config.grid.tile_size,
        }
    }
}

/// Text/status for the heads-up display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudStatus {
    pub lives: u8,
    pub score: u64,
    /// 1-based
    pub level: usize,
    pub level_count: usize,
    pub shielded: bool,
    pub double_score: bool,
    /// Seconds of double score left
    pub double_score_remaining: f64,
    pub paused: bool,
    /// End-of-game message, set once the game is over or won
    pub banner: Option<&'static str>,
}

impl HudStatus {
    pub fn of(state: &GameState) -> Self {
        Self {
            lives: state.lives,
            score: state.score,
            level: state.level_number(),
            level_count: state.config.level_count(),
            shielded: state.player.shielded,
            double_score: state.player.score_multiplier,
            double_score_remaining: state.multiplier_timer.remaining(state.clock),
            paused: state.phase == GamePhase::Paused,
            banner: state.phase.banner(),
        }
    }
}

/// Draws the current frame
pub trait RenderSink {
    fn render(&mut self, frame: &FrameSnapshot<'_>);
}

/// Plays sound effects, fire-and-forget
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Shows lives/score/level/shield/pause
pub trait HudSink {
    fn update(&mut self, status: &HudStatus);
}

/// Sink that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _frame: &FrameSnapshot<'_>) {}
}

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) {}
}

impl HudSink for NullSink {
    fn update(&mut self, _status: &HudStatus) {}
}

/// Audio sink that only logs, for the native build
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
    }
}

/// HUD sink that logs changes, for the native build
#[derive(Debug, Default, Clone)]
pub struct LogHud {
    last: Option<HudStatus>,
}

impl HudSink for LogHud {
    fn update(&mut self, status: &HudStatus) {
        if self.last.as_ref() == Some(status) {
            return;
        }
        match status.banner {
            Some(banner) => log::info!("{} Final score: {}", banner, status.score),
            None => log::info!(
                "Lives {} | Score {} | Level {}/{}{}{}{}",
                status.lives,
                status.score,
                status.level,
                status.level_count,
                if status.shielded { " | Shield" } else { "" },
                if status.double_score { " | x2" } else { "" },
                if status.paused { " | PAUSED" } else { "" },
            ),
        }
        self.last = Some(status.clone());
    }
}
