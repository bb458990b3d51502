//! End-to-end gameplay scenarios through the public simulation API.
//!
//! States are built with `GameState::with_layout` (no random obstacles) and
//! hazards are placed by hand, so each scenario is exact.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use bonk_crossing::GameConfig;
use bonk_crossing::consts::SIM_DT;
use bonk_crossing::frontend::{AudioSink, NullSink};
use bonk_crossing::session::{Session, Sinks};
use bonk_crossing::sim::{
    GameEvent, GamePhase, GameState, InputEvent, Obstacle, ObstacleKind, PowerUp, PowerUpKind,
    SoundEffect, apply_input, tick,
};

const START: Vec2 = Vec2::new(180.0, 360.0);

fn layout() -> (GameState, Pcg32) {
    (
        GameState::with_layout(GameConfig::default()),
        Pcg32::seed_from_u64(7),
    )
}

fn place_obstacle(state: &mut GameState, lane: usize, x: f32) {
    let (y, speed) = (state.lanes[lane].y, state.lanes[lane].speed);
    state.lanes[lane].obstacles.push(Obstacle {
        lane_index: lane,
        x,
        y,
        width: 40.0,
        height: 40.0,
        speed,
        kind: ObstacleKind::Orange,
    });
}

fn hop(state: &mut GameState, rng: &mut Pcg32, times: usize) {
    for _ in 0..times {
        assert!(apply_input(state, InputEvent::MoveUp, rng));
    }
}

#[test]
fn four_hops_then_bonk() {
    let (mut state, mut rng) = layout();

    hop(&mut state, &mut rng, 4);
    assert_eq!(state.player.pos, Vec2::new(180.0, 200.0));
    assert_eq!(state.score, 40);

    place_obstacle(&mut state, 4, 180.0);
    hop(&mut state, &mut rng, 1);
    assert_eq!(state.player.pos.y, 160.0);

    let outcome = tick(&mut state, SIM_DT).expect("active game ticks");
    assert!(outcome.hit.is_some());
    assert_eq!(state.lives, 2);
    assert_eq!(state.player.pos, START);
    assert_eq!(state.phase, GamePhase::Active);
    assert!(
        state
            .drain_events()
            .contains(&GameEvent::Bonked { lives_left: 2 })
    );
}

#[test]
fn double_score_doubles_then_expires() {
    let (mut state, mut rng) = layout();
    state
        .power_ups
        .push(PowerUp::new(PowerUpKind::DoubleScore, START, 40.0));

    let outcome = tick(&mut state, SIM_DT).expect("active game ticks");
    assert_eq!(outcome.collected, vec![PowerUpKind::DoubleScore]);
    assert!(state.player.score_multiplier);

    hop(&mut state, &mut rng, 1);
    assert_eq!(state.score, 20);

    for _ in 0..600 {
        tick(&mut state, SIM_DT);
    }
    assert!(!state.player.score_multiplier);

    hop(&mut state, &mut rng, 1);
    assert_eq!(state.score, 30);
}

#[test]
fn second_double_score_restarts_the_clock() {
    let (mut state, _rng) = layout();
    state
        .power_ups
        .push(PowerUp::new(PowerUpKind::DoubleScore, START, 40.0));
    tick(&mut state, SIM_DT);

    for _ in 0..300 {
        tick(&mut state, SIM_DT);
    }
    state
        .power_ups
        .push(PowerUp::new(PowerUpKind::DoubleScore, START, 40.0));
    tick(&mut state, SIM_DT);

    // The first pickup's expiry has passed, the second one's has not
    for _ in 0..400 {
        tick(&mut state, SIM_DT);
    }
    assert!(state.player.score_multiplier);

    for _ in 0..250 {
        tick(&mut state, SIM_DT);
    }
    assert!(!state.player.score_multiplier);
}

#[test]
fn shield_absorbs_one_bonk() {
    let (mut state, mut rng) = layout();
    state.player.shielded = true;
    place_obstacle(&mut state, 8, 180.0);

    hop(&mut state, &mut rng, 1);
    tick(&mut state, SIM_DT);

    assert_eq!(state.lives, 3);
    assert!(!state.player.shielded);
    assert_eq!(state.player.pos, START);
    assert!(state.drain_events().contains(&GameEvent::ShieldAbsorbed));
}

#[test]
fn goal_on_last_level_wins() {
    let (mut state, mut rng) = layout();
    state.level_index = state.config.levels.len() - 1;
    state.player.pos = Vec2::new(180.0, 40.0);

    hop(&mut state, &mut rng, 1);

    assert_eq!(state.phase, GamePhase::Won);
    assert_eq!(state.score, 110);
    assert_eq!(state.phase.banner(), Some("YOU BONKED IT!"));
    assert!(tick(&mut state, SIM_DT).is_none());
}

#[test]
fn goal_on_earlier_level_regenerates() {
    let (mut state, mut rng) = layout();
    state.level_index = 1;
    state.player.pos = Vec2::new(180.0, 40.0);

    hop(&mut state, &mut rng, 1);

    assert_eq!(state.phase, GamePhase::Active);
    assert_eq!(state.level_index, 2);
    assert_eq!(state.player.pos, START);
    let level = state.config.levels[2];
    for lane in state.lanes.iter().filter(|lane| lane.is_road()) {
        let count = lane.obstacles.len() as u32;
        assert!((level.min_obstacles..=level.max_obstacles).contains(&count));
        for obstacle in &lane.obstacles {
            assert_eq!(obstacle.speed, lane.speed);
        }
    }
}

#[test]
fn classic_variant_wins_on_first_goal() {
    let mut state = GameState::with_layout(GameConfig::classic());
    let mut rng = Pcg32::seed_from_u64(3);
    state.player.pos = Vec2::new(180.0, 40.0);

    hop(&mut state, &mut rng, 1);
    assert_eq!(state.phase, GamePhase::Won);
}

#[test]
fn restart_from_game_over_resets_everything() {
    let (mut state, mut rng) = layout();
    state.lives = 1;
    state.score = 250;
    state.level_index = 3;
    state.player.score_multiplier = true;
    place_obstacle(&mut state, 8, 180.0);
    hop(&mut state, &mut rng, 1);
    tick(&mut state, SIM_DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    assert!(apply_input(&mut state, InputEvent::Restart, &mut rng));

    assert_eq!(state.phase, GamePhase::Active);
    assert_eq!(state.lives, 3);
    assert_eq!(state.score, 0);
    assert_eq!(state.level_index, 0);
    assert!(!state.player.shielded);
    assert!(!state.player.score_multiplier);
    assert!(!state.multiplier_timer.is_armed());
    assert_eq!(state.player.pos, START);
    assert!(state.drain_events().contains(&GameEvent::Restarted));
}

#[test]
fn pause_freezes_obstacles() {
    let mut rng = Pcg32::seed_from_u64(2024);
    let mut state = GameState::new(GameConfig::default(), &mut rng).unwrap();
    let positions = |state: &GameState| -> Vec<f32> {
        state
            .lanes
            .iter()
            .flat_map(|lane| lane.obstacles.iter().map(|o| o.x))
            .collect()
    };

    apply_input(&mut state, InputEvent::TogglePause, &mut rng);
    let frozen = positions(&state);
    for _ in 0..120 {
        tick(&mut state, SIM_DT);
    }
    assert_eq!(positions(&state), frozen);

    apply_input(&mut state, InputEvent::TogglePause, &mut rng);
    tick(&mut state, SIM_DT);
    assert_ne!(positions(&state), frozen);
}

#[derive(Default)]
struct Sounds(Vec<SoundEffect>);

impl AudioSink for Sounds {
    fn play(&mut self, effect: SoundEffect) {
        self.0.push(effect);
    }
}

#[test]
fn session_plays_bonk_and_stops_on_game_over() {
    let mut session = Session::new(GameConfig::default(), 11).unwrap();
    {
        let state = session.state_mut();
        for lane in state.lanes.iter_mut() {
            lane.obstacles.clear();
        }
        state.power_ups.clear();
        state.lives = 1;
        place_obstacle(state, 8, 180.0);
        state.player.pos = Vec2::new(180.0, 320.0);
    }

    let mut render = NullSink;
    let mut hud = NullSink;
    let mut audio = Sounds::default();
    let mut sinks = Sinks {
        render: &mut render,
        audio: &mut audio,
        hud: &mut hud,
    };

    assert!(!session.frame(SIM_DT * 1.5, &mut sinks));
    assert_eq!(session.phase(), GamePhase::GameOver);

    // Game over stops the loop; restart asks for it back
    assert!(!session.frame(SIM_DT, &mut sinks));
    assert!(session.handle_input(InputEvent::Restart, &mut sinks));
    assert!(session.is_running());

    assert!(audio.0.contains(&SoundEffect::Bonk));
    assert!(audio.0.contains(&SoundEffect::GameOver));
}

#[test]
fn same_seed_same_level() {
    let a = Session::new(GameConfig::default(), 42).unwrap();
    let b = Session::new(GameConfig::default(), 42).unwrap();
    let obstacles = |s: &Session| -> Vec<(usize, f32, f32)> {
        s.state()
            .lanes
            .iter()
            .flat_map(|lane| lane.obstacles.iter().map(|o| (o.lane_index, o.x, o.width)))
            .collect()
    };
    assert_eq!(obstacles(&a), obstacles(&b));
    assert_eq!(a.state().power_ups.len(), b.state().power_ups.len());
}
