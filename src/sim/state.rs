//! Game state and core simulation types
//!
//! One `GameState` per session. Every tick and input mutates it; restart
//! rebuilds it wholesale from the config.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::grid::{Lane, Rect};
use super::level;
use super::timer::ExpiryTimer;
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking and accepting moves
    Active,
    /// Frozen until resumed
    Paused,
    /// Out of lives (terminal)
    GameOver,
    /// Past the last level (terminal)
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }

    /// Message for the end-of-game screen
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            GamePhase::Won => Some("YOU BONKED IT!"),
            GamePhase::GameOver => Some("GAME OVER!"),
            _ => None,
        }
    }
}

/// Obstacle look, picked at random per obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Orange,
    Steel,
    Lime,
}

impl ObstacleKind {
    /// Map a uniform roll in [0, 1) to a kind
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.33 {
            ObstacleKind::Orange
        } else if roll < 0.66 {
            ObstacleKind::Steel
        } else {
            ObstacleKind::Lime
        }
    }
}

/// A moving hazard in a road lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick (lane base speed times level multiplier)
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Absorbs the next hit
    pub shielded: bool,
    /// Double score active
    pub score_multiplier: bool,
}

impl Player {
    pub fn new(start: Vec2, tile_size: f32) -> Self {
        Self {
            pos: start,
            width: tile_size,
            height: tile_size,
            shielded: false,
            score_multiplier: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Multiplier applied to points earned right now
    pub fn points_factor(&self) -> u64 {
        if self.score_multiplier {
            DOUBLE_SCORE_FACTOR
        } else {
            1
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    DoubleScore,
}

/// A pickup sitting on a safe lane. Stays in place once collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, size: f32) -> Self {
        Self {
            kind,
            pos,
            size,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Layout and level table this session runs on
    pub config: GameConfig,
    pub lives: u8,
    pub score: u64,
    /// Current level (0-based)
    pub level_index: usize,
    pub phase: GamePhase,
    pub player: Player,
    /// Lanes top to bottom, with their obstacles
    pub lanes: Vec<Lane>,
    pub power_ups: Vec<PowerUp>,
    /// Clears the score multiplier
    pub multiplier_timer: ExpiryTimer,
    /// Session time in seconds (advances only while ticking)
    pub clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the host last drained them
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh game at level 0, rejecting configs the generator can't run
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::fresh(config, rng))
    }

    /// Level 0 of an already validated config
    pub(crate) fn fresh<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let mut state = Self::with_layout(config);
        level::initialize_level(&mut state, 0, rng);
        state
    }

    /// Fresh state with the level-0 lane layout but no obstacles or power-ups
    pub fn with_layout(config: GameConfig) -> Self {
        let start = config.start_position();
        let tile = config.grid.tile_size;
        let lanes = level::build_lanes(&config, 0);
        Self {
            lives: START_LIVES,
            score: 0,
            level_index: 0,
            phase: GamePhase::Active,
            player: Player::new(start, tile),
            lanes,
            power_ups: Vec::new(),
            multiplier_timer: ExpiryTimer::new(),
            clock: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Level number for display (1-based)
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    /// Put the player back on the starting tile
    pub fn reset_player_position(&mut self) {
        self.player.pos = self.config.start_position();
    }

    /// Award points, doubled while the multiplier is active
    pub fn award(&mut self, base: u64) -> u64 {
        let points = base * self.player.points_factor();
        self.score += points;
        points
    }

    /// Turn on double score and (re)arm its expiry
    pub fn activate_multiplier(&mut self) {
        self.player.score_multiplier = true;
        self.multiplier_timer
            .arm(self.clock, self.config.multiplier_duration_secs);
    }

    /// Clear the multiplier if its expiry has passed
    pub fn expire_multiplier(&mut self) {
        if self.multiplier_timer.poll(self.clock) {
            self.player.score_multiplier = false;
            log::debug!("Double score expired at t={:.2}s", self.clock);
            self.push_event(GameEvent::MultiplierExpired);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
