//! Pocket Pool - a 2D billiards table with multiplayer eight-ball rules
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, table, roster, rule state machine)
//! - `settings`: Input profile and tunables
//! - `demo`: Seeded autoplayer that drives the command surface
//! - `web`: wasm32 bindings for a browser front end

pub mod demo;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use demo::Autoplayer;
pub use settings::{InputProfile, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate. One tick is one physics step, independent of frame rate.
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICKS_PER_SECOND as f64;
    /// Maximum ticks per external frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Table dimensions
    pub const TABLE_WIDTH: f64 = 800.0;
    pub const TABLE_HEIGHT: f64 = 400.0;

    /// Ball and pocket sizes
    pub const BALL_RADIUS: f64 = 10.0;
    pub const POCKET_RADIUS: f64 = 18.0;

    /// Velocity retained per tick (felt friction)
    pub const FRICTION: f64 = 0.985;
    /// Velocity components below this snap to exactly zero
    pub const MIN_VELOCITY: f64 = 0.05;

    /// Longest drag (pre-scale) that still adds power
    pub const MAX_DRAG: f64 = 100.0;
    /// Drags no longer than this on both axes are not shots
    pub const MIN_DRAG: f64 = 1.0;
    /// Cue-ball placement keeps this many radii from every other ball
    pub const PLACEMENT_CLEARANCE: f64 = 2.5;

    /// Break layout
    pub const CUE_START: (f64, f64) = (400.0, 200.0);
    pub const RACK_APEX: (f64, f64) = (600.0, 200.0);
    pub const RACK_ROWS: usize = 5;

    /// Roster bounds
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 8;
}
