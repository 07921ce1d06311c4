//! Browser bindings
//!
//! The page owns a `WebGame`, calls `frame` from `requestAnimationFrame`,
//! forwards pointer and button events, and redraws from `snapshot`.

use glam::DVec2;
use wasm_bindgen::prelude::*;

use crate::settings::{InputProfile, Settings};
use crate::sim::{AimDrag, Command, Game, GameView, Phase, Stepper};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pocket Pool starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    stepper: Stepper,
    drag: AimDrag,
}

#[wasm_bindgen]
impl WebGame {
    /// `profile` is "mouse" or "touch"; anything else falls back to mouse
    #[wasm_bindgen(constructor)]
    pub fn new(profile: &str) -> WebGame {
        let input = InputProfile::from_str(profile).unwrap_or_default();
        log::info!("Input profile: {}", input.as_str());
        WebGame {
            game: Game::new(Settings::from_profile(input)),
            stepper: Stepper::new(),
            drag: AimDrag::default(),
        }
    }

    /// Advance by `dt` seconds of wall time. Returns the ticks simulated.
    pub fn frame(&mut self, dt: f64) -> u32 {
        let ticks = self.stepper.ticks_due(dt);
        for _ in 0..ticks {
            self.game.step();
        }
        ticks
    }

    /// Pointer pressed at table coordinates
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let point = DVec2::new(x, y);
        if *self.game.phase() == Phase::CueBallInHand {
            let _ = self.game.apply(Command::PlaceCueBall(point));
            return;
        }
        if !self.game.is_aim_target(point) {
            return;
        }
        if let Some(cue) = self.game.table.cue_ball() {
            let grab = self.game.settings.grab_radius(cue.radius);
            self.drag.begin(point, cue.pos, grab);
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.drag.update(DVec2::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        if let Some(vector) = self.drag.release() {
            let _ = self.game.apply(Command::Launch(vector));
        }
    }

    /// Current drag vector as `[x, y]`, empty when not aiming
    pub fn aim_vector(&self) -> Vec<f64> {
        self.drag.vector().map(|v| vec![v.x, v.y]).unwrap_or_default()
    }

    /// Whether a ghost cue ball at the pointer would be a legal placement
    pub fn placement_ok(&self, x: f64, y: f64) -> bool {
        self.game.is_valid_cue_position(DVec2::new(x, y))
    }

    pub fn add_player(&mut self) -> bool {
        self.game.apply(Command::AddPlayer).is_ok()
    }

    pub fn remove_player(&mut self) -> bool {
        self.game.apply(Command::RemovePlayer).is_ok()
    }

    pub fn restart(&mut self) {
        self.drag.cancel();
        let _ = self.game.apply(Command::Reset);
    }

    /// Full view as JSON for the renderer and HUD
    pub fn snapshot(&self) -> Result<String, JsValue> {
        GameView::capture(&self.game)
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
