//! Frame driver between the host loop and the simulation
//!
//! Owns the game state and its RNG, turns frame deltas into fixed ticks,
//! and pushes each frame's results out to the sinks. The host keeps
//! requesting frames only while `frame` says so.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{ConfigError, GameConfig};
use crate::consts::*;
use crate::frontend::{AudioSink, FrameSnapshot, HudSink, HudStatus, InputEvent, RenderSink};
use crate::sim::{GamePhase, GameState, apply_input, tick};

/// Longest frame delta fed to the accumulator (tab switches, hitches)
const MAX_FRAME_DT: f32 = 0.1;

/// The three outputs a frame is presented to
pub struct Sinks<'a> {
    pub render: &'a mut dyn RenderSink,
    pub audio: &'a mut dyn AudioSink,
    pub hud: &'a mut dyn HudSink,
}

/// One play session
pub struct Session<R = Pcg32> {
    state: GameState,
    rng: R,
    accumulator: f32,
}

impl Session<Pcg32> {
    /// Seeded session; the same seed and inputs replay identically
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let session = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        log::info!("Session started with seed {}", seed);
        Ok(session)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        let state = GameState::new(config, &mut rng)?;
        Ok(Self {
            state,
            rng,
            accumulator: 0.0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Active
    }

    /// Run the ticks owed for `dt` seconds of wall time and present the result.
    ///
    /// Returns whether the host should request another frame.
    pub fn frame(&mut self, dt: f32, sinks: &mut Sinks<'_>) -> bool {
        if self.is_running() {
            // NaN would stick in the accumulator and stall every later frame
            let dt = if dt.is_finite() {
                dt.clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
                if !self.is_running() {
                    break;
                }
            }
        }

        if !self.is_running() {
            self.accumulator = 0.0;
        }

        self.present(sinks);
        self.is_running()
    }

    /// Apply an input between frames and present the result.
    ///
    /// Returns true when the frame loop was stopped and must be restarted
    /// (resume from pause, restart after the game ended).
    pub fn handle_input(&mut self, input: InputEvent, sinks: &mut Sinks<'_>) -> bool {
        let was_running = self.is_running();
        let handled = apply_input(&mut self.state, input, &mut self.rng);
        if !handled {
            log::trace!("Ignored {:?} in {:?}", input, self.state.phase);
            return false;
        }

        self.present(sinks);

        let restart_loop = !was_running && self.is_running();
        if restart_loop {
            self.accumulator = 0.0;
        }
        restart_loop
    }

    /// Flush queued sounds and hand the current frame to the renderer and HUD
    pub fn present(&mut self, sinks: &mut Sinks<'_>) {
        for event in self.state.drain_events() {
            if let Some(effect) = event.sound() {
                sinks.audio.play(effect);
            }
        }
        sinks.render.render(&FrameSnapshot::of(&self.state));
        sinks.hud.update(&HudStatus::of(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::NullSink;
    use crate::sim::{LevelDefinition, SoundEffect};

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<SoundEffect>,
        frames: usize,
        hud: Option<HudStatus>,
    }

    impl RenderSink for Recorder {
        fn render(&mut self, _frame: &FrameSnapshot<'_>) {
            self.frames += 1;
        }
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }
    }

    impl HudSink for Recorder {
        fn update(&mut self, status: &HudStatus) {
            self.hud = Some(status.clone());
        }
    }

    fn run_frame(session: &mut Session, dt: f32, out: &mut Recorder) -> bool {
        let mut render = NullSink;
        let mut hud = NullSink;
        let mut sinks = Sinks {
            render: &mut render,
            audio: out,
            hud: &mut hud,
        };
        session.frame(dt, &mut sinks)
    }

    fn send(session: &mut Session, input: InputEvent, out: &mut Recorder) -> bool {
        let mut render = NullSink;
        let mut hud = NullSink;
        let mut sinks = Sinks {
            render: &mut render,
            audio: out,
            hud: &mut hud,
        };
        session.handle_input(input, &mut sinks)
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut out = Recorder::default();
        assert!(run_frame(&mut session, SIM_DT * 2.5, &mut out));
        assert_eq!(session.state().time_ticks, 2);
        assert!(run_frame(&mut session, SIM_DT * 0.6, &mut out));
        assert_eq!(session.state().time_ticks, 3);
    }

    #[test]
    fn test_nan_frame_does_not_stall() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut out = Recorder::default();
        assert!(run_frame(&mut session, f32::NAN, &mut out));
        assert!(run_frame(&mut session, f32::INFINITY, &mut out));
        assert_eq!(session.state().time_ticks, 0);

        for _ in 0..10 {
            run_frame(&mut session, SIM_DT * 1.01, &mut out);
        }
        assert_eq!(session.state().time_ticks, 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            levels: vec![LevelDefinition::new(1, 1.0, 5, 2)],
            ..GameConfig::default()
        };
        let err = Session::new(config, 1).err().expect("inverted range rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidObstacleRange { level: 1, min: 5, max: 2 }
        ));
    }

    #[test]
    fn test_substeps_capped() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut out = Recorder::default();
        run_frame(&mut session, 5.0, &mut out);
        assert_eq!(session.state().time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_pause_stops_and_resume_restarts_loop() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut out = Recorder::default();

        assert!(!send(&mut session, InputEvent::TogglePause, &mut out));
        assert!(!run_frame(&mut session, 1.0, &mut out));
        assert_eq!(session.state().time_ticks, 0);

        assert!(send(&mut session, InputEvent::TogglePause, &mut out));
        assert!(run_frame(&mut session, SIM_DT, &mut out));
        assert_eq!(session.state().time_ticks, 1);
    }

    #[test]
    fn test_hop_plays_sound_and_updates_hud() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut render = Recorder::default();
        let mut audio = Recorder::default();
        let mut hud = Recorder::default();
        let mut sinks = Sinks {
            render: &mut render,
            audio: &mut audio,
            hud: &mut hud,
        };
        session.handle_input(InputEvent::MoveUp, &mut sinks);

        assert_eq!(audio.sounds, vec![SoundEffect::Hop]);
        assert_eq!(render.frames, 1);
        let status = hud.hud.expect("hud updated");
        assert_eq!(status.score, 10);
        assert_eq!(status.lives, 3);
        assert_eq!(status.level, 1);
    }

    #[test]
    fn test_ignored_input_presents_nothing() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let mut out = Recorder::default();
        assert!(!send(&mut session, InputEvent::Restart, &mut out));
        assert!(out.sounds.is_empty());
    }
}
