//! Bonk Crossing entry point
//!
//! Browser: wires the canvas, DOM HUD, Web Audio and keyboard to a session
//! and drives it from requestAnimationFrame. Native: runs a headless demo
//! with a simple autopilot and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use bonk_crossing::GameConfig;
    use bonk_crossing::audio::AudioManager;
    use bonk_crossing::frontend::InputEvent;
    use bonk_crossing::renderer::{CanvasRenderer, DomHud};
    use bonk_crossing::session::{Session, Sinks};

    /// Game instance holding the session and its browser sinks
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        hud: DomHud,
        audio: AudioManager,
        last_time: Option<f64>,
        /// A requestAnimationFrame callback is pending
        loop_running: bool,
    }

    impl Game {
        /// Run one frame; returns whether to schedule another
        fn frame(&mut self, time: f64) -> bool {
            let dt = self
                .last_time
                .map_or(0.0, |last| ((time - last) / 1000.0) as f32);
            self.last_time = Some(time);

            let mut sinks = Sinks {
                render: &mut self.renderer,
                audio: &mut self.audio,
                hud: &mut self.hud,
            };
            self.session.frame(dt, &mut sinks)
        }

        /// Apply an input; returns true if the frame loop must be restarted
        fn input(&mut self, input: InputEvent) -> bool {
            self.audio.resume();
            let mut sinks = Sinks {
                render: &mut self.renderer,
                audio: &mut self.audio,
                hud: &mut self.hud,
            };
            let restart = self.session.handle_input(input, &mut sinks);
            if restart {
                self.last_time = None;
            }
            restart && !self.loop_running
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Bonk Crossing starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element - cannot start");
            return;
        };

        let config = GameConfig::default();
        canvas.set_width(config.grid.width as u32);
        canvas.set_height(config.grid.height as u32);

        let renderer = match CanvasRenderer::new(&canvas) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Canvas setup failed: {:?}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(config, seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid game config: {}", e);
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            hud: DomHud::new(document),
            audio: AudioManager::new(),
            last_time: None,
            loop_running: true,
        }));

        setup_keyboard(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Bonk Crossing running!");
    }

    fn key_to_input(key: &str) -> Option<InputEvent> {
        match key {
            "ArrowUp" | "w" | "W" => Some(InputEvent::MoveUp),
            "ArrowDown" | "s" | "S" => Some(InputEvent::MoveDown),
            "ArrowLeft" | "a" | "A" => Some(InputEvent::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(InputEvent::MoveRight),
            "p" | "P" | "Escape" => Some(InputEvent::TogglePause),
            "r" | "R" | "Enter" => Some(InputEvent::Restart),
            _ => None,
        }
    }

    fn dispatch(game: &Rc<RefCell<Game>>, input: InputEvent) {
        let restart_loop = game.borrow_mut().input(input);
        if restart_loop {
            game.borrow_mut().loop_running = true;
            request_animation_frame(game.clone());
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            let key = event.key();
            if key == "m" || key == "M" {
                let muted = game.borrow_mut().audio.toggle_mute();
                log::info!("Sound {}", if muted { "muted" } else { "on" });
                return;
            }
            let Some(input) = key_to_input(&key) else {
                return;
            };
            // Keep arrow keys from scrolling the page
            event.prevent_default();
            dispatch(&game, input);
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                dispatch(&game, InputEvent::Restart);
            });
            let _ =
                btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-button element, restart is keyboard-only");
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Window blur (click outside, tab switch)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let running = game.borrow().session.is_running();
            if running {
                dispatch(&game, InputEvent::TogglePause);
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Self-rescheduling while the session is active; pausing or game end
    /// simply stops requesting frames
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.frame(time);
            g.loop_running = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bonk Crossing (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable game");

    native_demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use bonk_crossing::consts::SIM_DT;
    use bonk_crossing::frontend::{InputEvent, LogAudio, LogHud, NullSink};
    use bonk_crossing::session::{Session, Sinks};
    use bonk_crossing::sim::{GameState, Rect, lane_at, overlaps};
    use bonk_crossing::GameConfig;

    /// Stop after this many frames even if the autopilot never finishes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub fn run() {
        let seed = match std::env::var("BONK_SEED") {
            Ok(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Invalid BONK_SEED '{}', using default", raw);
                1
            }),
            Err(_) => 1,
        };
        let config = match std::env::var("BONK_CLASSIC").as_deref() {
            Ok("1") | Ok("true") => GameConfig::classic(),
            _ => GameConfig::default(),
        };

        let mut session = match Session::new(config, seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid game config: {}", e);
                return;
            }
        };
        let mut render = NullSink;
        let mut audio = LogAudio;
        let mut hud = LogHud::default();
        let mut sinks = Sinks {
            render: &mut render,
            audio: &mut audio,
            hud: &mut hud,
        };

        let mut frames = 0;
        while frames < MAX_FRAMES {
            if !session.frame(SIM_DT, &mut sinks) {
                break;
            }
            if frames % 6 == 0 && safe_to_hop(session.state()) {
                session.handle_input(InputEvent::MoveUp, &mut sinks);
            }
            frames += 1;
        }

        let state = session.state();
        log::info!(
            "Demo finished after {} frames: {:?}, score {}, level {}, lives {}",
            frames,
            state.phase,
            state.score,
            state.level_number(),
            state.lives
        );
    }

    /// Hop only when the lane above has no hammer near the player
    fn safe_to_hop(state: &GameState) -> bool {
        let tile = state.config.grid.tile_size;
        let target_y = state.player.pos.y - tile;
        let Some(lane) = lane_at(&state.lanes, target_y, tile) else {
            return false;
        };
        let margin = Rect::new(
            state.player.pos.x - 2.0 * tile,
            target_y,
            state.player.width + 4.0 * tile,
            tile,
        );
        !lane
            .obstacles
            .iter()
            .any(|obstacle| overlaps(&margin, &obstacle.bounds()))
    }
}
