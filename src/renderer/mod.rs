//! Canvas 2D rendering module
//!
//! Draws lanes, hammers, power-ups and the player. Sprites that have not
//! loaded (or failed to) are drawn as flat placeholder shapes.

pub mod hud;

pub use hud::DomHud;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::{AssetReporter, AssetStatus, AssetTracker};
use crate::frontend::{FrameSnapshot, RenderSink};
use crate::sim::{LaneKind, Obstacle, ObstacleKind, Player, PowerUp, PowerUpKind};

const PLAYER_SPRITE: &str = "dog-bonk.png";
const ROAD_COLOR: &str = "#444";

/// Renders frames onto a 2D canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    player_img: Option<HtmlImageElement>,
    assets: AssetTracker,
    placeholder_logged: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut assets = AssetTracker::new();
        let reporter = assets.track(PLAYER_SPRITE);
        let player_img = match load_image(PLAYER_SPRITE, reporter.clone()) {
            Ok(img) => Some(img),
            Err(e) => {
                reporter.failed(format!("{:?}", e));
                None
            }
        };

        Ok(Self {
            ctx,
            player_img,
            assets,
            placeholder_logged: false,
        })
    }

    fn draw_lanes(&self, frame: &FrameSnapshot<'_>) {
        let ctx = &self.ctx;
        let tile = frame.tile_size as f64;
        let width = frame.grid_width as f64;

        for lane in frame.lanes {
            let y = lane.y as f64;
            match &lane.kind {
                LaneKind::Safe { color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, y, width, tile);
                }
                LaneKind::Road { .. } => {
                    ctx.set_fill_style_str(ROAD_COLOR);
                    ctx.fill_rect(0.0, y, width, tile);

                    // Dashed centre line
                    ctx.set_stroke_style_str("#888");
                    ctx.set_line_width(2.0);
                    let dash =
                        js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
                    ctx.set_line_dash(&dash).ok();
                    ctx.begin_path();
                    ctx.move_to(0.0, y + tile / 2.0);
                    ctx.line_to(width, y + tile / 2.0);
                    ctx.stroke();
                    ctx.set_line_dash(&js_sys::Array::new()).ok();
                }
            }

            for obstacle in &lane.obstacles {
                self.draw_hammer(obstacle);
            }
        }
    }

    fn draw_hammer(&self, obstacle: &Obstacle) {
        let ctx = &self.ctx;
        let (x, y) = (obstacle.x as f64, obstacle.y as f64);
        let (w, h) = (obstacle.width as f64, obstacle.height as f64);

        ctx.set_fill_style_str(hammer_color(obstacle.kind));
        ctx.fill_rect(x, y, w, h);
        // Handle
        ctx.set_fill_style_str("#333");
        ctx.fill_rect(x + w / 2.0 - 5.0, y + h / 2.0, 10.0, h / 2.0);
        // Head detail
        ctx.set_fill_style_str("#666");
        ctx.fill_rect(x + w / 4.0, y + h / 4.0, w / 2.0, h / 2.0);
    }

    fn draw_power_up(&self, power_up: &PowerUp) {
        if power_up.collected {
            return;
        }
        let ctx = &self.ctx;
        let r = power_up.size as f64 / 2.0;
        let (cx, cy) = (power_up.pos.x as f64 + r, power_up.pos.y as f64 + r);

        let (fill, label) = match power_up.kind {
            PowerUpKind::Shield => ("#00BFFF", "S"),
            PowerUpKind::DoubleScore => ("#FFD700", "x2"),
        };
        ctx.set_fill_style_str(fill);
        ctx.begin_path();
        ctx.arc(cx, cy, r * 0.7, 0.0, std::f64::consts::TAU).ok();
        ctx.fill();

        ctx.set_fill_style_str("#000");
        ctx.set_font("bold 14px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(label, cx, cy).ok();
    }

    fn draw_player(&mut self, player: &Player) {
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        let (w, h) = (player.width as f64, player.height as f64);

        let sprite = self
            .player_img
            .as_ref()
            .filter(|_| self.assets.is_ready(PLAYER_SPRITE));
        match sprite {
            Some(img) => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                    .ok();
            }
            None => {
                if !self.placeholder_logged
                    && matches!(self.assets.status(PLAYER_SPRITE), AssetStatus::Failed(_))
                {
                    log::warn!("Player image not loaded or broken, drawing red square");
                    self.placeholder_logged = true;
                }
                self.ctx.set_fill_style_str("red");
                self.ctx.fill_rect(x, y, w, h);
            }
        }

        if player.shielded {
            self.ctx.set_stroke_style_str("#00BFFF");
            self.ctx.set_line_width(3.0);
            self.ctx.begin_path();
            self.ctx
                .arc(x + w / 2.0, y + h / 2.0, w * 0.65, 0.0, std::f64::consts::TAU)
                .ok();
            self.ctx.stroke();
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>) {
        self.assets.poll();

        self.ctx.clear_rect(
            0.0,
            0.0,
            frame.grid_width as f64,
            frame.grid_height as f64,
        );
        self.draw_lanes(frame);
        for power_up in frame.power_ups {
            self.draw_power_up(power_up);
        }
        self.draw_player(frame.player);
    }
}

fn hammer_color(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Orange => "#FF4500",
        ObstacleKind::Steel => "#4682B4",
        ObstacleKind::Lime => "#32CD32",
    }
}

/// Start loading an image; completion is reported through the tracker channel
fn load_image(src: &str, reporter: AssetReporter) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;

    let on_load = {
        let reporter = reporter.clone();
        Closure::<dyn FnMut()>::new(move || reporter.loaded())
    };
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();

    let on_error = {
        let src = src.to_string();
        Closure::<dyn FnMut()>::new(move || reporter.failed(format!("could not load {}", src)))
    };
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    img.set_src(src);
    Ok(img)
}
