//! Rule state machine
//!
//! Interprets each tick's pocket batch as the outcome of the shot in play and
//! decides suit assignment, fouls, turn changes and the end of the game.
//!
//! An illegal eight ball hands the game to the next active player outright
//! rather than letting the rest of the table play on. This is a deliberate
//! house rule, not standard eight-ball.

use serde::{Deserialize, Serialize};

use super::roster::Roster;
use super::state::{BallKind, PocketedBall, Suit, TableState};

/// Current phase of play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Cue ball at rest, current player may shoot
    Aiming,
    /// Physics running after a shot
    BallsInMotion,
    /// Cue ball was pocketed; current player must place it
    CueBallInHand,
    /// Terminal
    GameOver { winner: String },
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Aiming => "aiming",
            Phase::BallsInMotion => "balls_in_motion",
            Phase::CueBallInHand => "cue_ball_in_hand",
            Phase::GameOver { .. } => "game_over",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }
}

/// What one pocket batch contained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub cue_fouled: bool,
    pub eight_pocketed: bool,
    /// Suits of the numbered balls, in batch order
    pub object_suits: Vec<Suit>,
}

impl BatchSummary {
    pub fn classify(batch: &[PocketedBall]) -> Self {
        let mut summary = Self::default();
        for dropped in batch {
            match dropped.ball.kind {
                BallKind::Cue => summary.cue_fouled = true,
                BallKind::Eight => summary.eight_pocketed = true,
                kind => summary.object_suits.extend(kind.suit()),
            }
        }
        summary
    }
}

/// Phase plus the permanent record of pocketed balls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEngine {
    pub phase: Phase,
    /// Every ball that has dropped this game, in drop order
    pub history: Vec<PocketedBall>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            phase: Phase::Aiming,
            history: Vec::new(),
        }
    }
}

impl RuleEngine {
    pub fn winner(&self) -> Option<&str> {
        match &self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Count of pocketed balls belonging to `suit`
    pub fn pocketed_count(&self, suit: Suit) -> usize {
        self.history
            .iter()
            .filter(|p| p.ball.kind.suit() == Some(suit))
            .count()
    }

    /// Judge one non-empty pocket batch against the player holding the turn.
    pub fn on_pocketed(&mut self, batch: &[PocketedBall], table: &TableState, roster: &mut Roster) {
        if batch.is_empty() {
            return;
        }
        self.history.extend_from_slice(batch);

        if self.phase.is_over() {
            return;
        }

        let summary = BatchSummary::classify(batch);
        log::debug!(
            "{} pocketed {:?}",
            roster.current().name,
            batch.iter().map(PocketedBall::id).collect::<Vec<_>>()
        );

        // Suit assignment stands even if the shot turns out to be a foul
        let mut assigned_now = false;
        if roster.current().suit.is_none() {
            if let Some(&first) = summary.object_suits.first() {
                roster.assign_suit(first);
                assigned_now = true;
                log::info!("{} takes {}s", roster.current().name, first.as_str());
            }
        }

        if summary.eight_pocketed {
            self.end_on_eight(table, roster);
            return;
        }

        if summary.cue_fouled {
            self.phase = Phase::CueBallInHand;
            roster.switch_player();
            log::debug!("Scratch: {} has ball in hand", roster.current().name);
            return;
        }

        let own_suit = roster.current().suit;
        let valid = assigned_now || summary.object_suits.iter().any(|&s| Some(s) == own_suit);
        if !valid {
            roster.switch_player();
        }
    }

    /// The eight dropped: the shooter wins if their group is cleared,
    /// otherwise they are out and the game goes to the next active player.
    fn end_on_eight(&mut self, table: &TableState, roster: &mut Roster) {
        let remaining = roster
            .current()
            .suit
            .map_or(0, |suit| table.remaining(suit));

        let winner = if remaining == 0 {
            roster.current().name.clone()
        } else {
            roster.eliminate_current();
            log::info!(
                "{} sank the eight with {} left and is eliminated",
                roster.current().name,
                remaining
            );
            let active: Vec<_> = roster.players().iter().filter(|p| !p.eliminated).collect();
            if active.len() == 1 {
                active[0].name.clone()
            } else {
                roster
                    .next_active_index()
                    .map(|index| roster.players()[index].name.clone())
                    .unwrap_or_default()
            }
        };

        log::info!("{} wins", winner);
        self.phase = Phase::GameOver { winner };
    }

    /// Called after a tick that pocketed nothing: once the table is still,
    /// a shot in progress hands control back to the shooter's aim.
    pub fn on_motion_check(&mut self, table: &mut TableState) {
        if table.balls_moving() {
            return;
        }
        if self.phase == Phase::BallsInMotion {
            table.settle();
            self.phase = if table.cue_ball().is_some() {
                Phase::Aiming
            } else {
                Phase::CueBallInHand
            };
        } else if self.phase == Phase::CueBallInHand {
            table.settle();
        }
    }
}
