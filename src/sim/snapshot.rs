//! Read-only view of a game for renderers and HUDs
//!
//! Everything a front end draws comes from here; it never needs to reach
//! into `Game` directly.

use serde::{Deserialize, Serialize};

use super::game::Game;
use super::state::{BallKind, Suit, ball_color};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub number: u8,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub kind: BallKind,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketedView {
    pub number: u8,
    pub kind: BallKind,
    pub pocket: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub suit: Option<Suit>,
    pub eliminated: bool,
    pub current: bool,
}

/// Snapshot of everything the UI shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub balls: Vec<BallView>,
    pub pocketed: Vec<PocketedView>,
    pub players: Vec<PlayerView>,
    pub phase: String,
    pub winner: Option<String>,
    pub can_aim: bool,
    pub solids_pocketed: usize,
    pub stripes_pocketed: usize,
    pub status: String,
}

impl GameView {
    pub fn capture(game: &Game) -> Self {
        let over = game.phase().is_over();
        let current = game.roster.current_index();

        Self {
            balls: game
                .table
                .balls()
                .map(|b| BallView {
                    number: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                    kind: b.kind,
                    color: ball_color(b.id).to_string(),
                })
                .collect(),
            pocketed: game
                .rules
                .history
                .iter()
                .map(|p| PocketedView {
                    number: p.ball.id,
                    kind: p.ball.kind,
                    pocket: p.pocket,
                })
                .collect(),
            players: game
                .roster
                .players()
                .iter()
                .enumerate()
                .map(|(index, p)| PlayerView {
                    name: p.name.clone(),
                    suit: p.suit,
                    eliminated: p.eliminated,
                    current: index == current && !over,
                })
                .collect(),
            phase: game.phase().as_str().to_string(),
            winner: game.winner().map(str::to_string),
            can_aim: game.can_aim(),
            solids_pocketed: game.rules.pocketed_count(Suit::Solid),
            stripes_pocketed: game.rules.pocketed_count(Suit::Stripe),
            status: game.status(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
