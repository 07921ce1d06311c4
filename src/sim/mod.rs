//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one tick per `advance_tick`
//! - Stable iteration order (by ball id)
//! - No rendering, input or platform dependencies

pub mod aim;
pub mod collision;
pub mod game;
pub mod geometry;
pub mod roster;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aim::AimDrag;
pub use collision::{Contact, ball_contact, integrate, reflect_off_cushions, resolve_ball_pair};
pub use game::{Command, Game, Rejection};
pub use geometry::{POCKET_COUNT, Table};
pub use roster::{Player, Roster};
pub use rules::{BatchSummary, Phase, RuleEngine};
pub use snapshot::{BallView, GameView, PlayerView, PocketedView};
pub use state::{
    BALL_COUNT, Ball, BallKind, CUE_ID, EIGHT_ID, PocketedBall, Suit, TableState, ball_color,
    rack_center, rack_positions,
};
pub use tick::{Stepper, advance_tick};
