//! Table state and ball types
//!
//! Balls live in an id-indexed arena: slot `n` holds ball `n` while it is on
//! the table and `None` once it has been pocketed. Iteration is always in id
//! order, which keeps every pass deterministic.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Table;
use crate::consts::*;

/// Number of balls in a full set (cue + 15 numbered)
pub const BALL_COUNT: usize = 16;
/// Id of the cue ball
pub const CUE_ID: u8 = 0;
/// Id of the eight ball
pub const EIGHT_ID: u8 = 8;

/// The group a player is bound to after their first legal pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Solid,
    Stripe,
}

impl Suit {
    pub fn complement(self) -> Self {
        match self {
            Suit::Solid => Suit::Stripe,
            Suit::Stripe => Suit::Solid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Solid => "solid",
            Suit::Stripe => "stripe",
        }
    }
}

/// What a ball is, derived from its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Cue,
    Solid,
    Stripe,
    Eight,
}

impl BallKind {
    pub fn for_id(id: u8) -> Self {
        match id {
            CUE_ID => BallKind::Cue,
            EIGHT_ID => BallKind::Eight,
            1..=7 => BallKind::Solid,
            _ => BallKind::Stripe,
        }
    }

    /// Suit of a numbered object ball; `None` for the cue and the eight
    pub fn suit(&self) -> Option<Suit> {
        match self {
            BallKind::Solid => Some(Suit::Solid),
            BallKind::Stripe => Some(Suit::Stripe),
            BallKind::Cue | BallKind::Eight => None,
        }
    }
}

/// Color class for a ball number. Stripes share their solid's color.
pub fn ball_color(id: u8) -> &'static str {
    match id {
        CUE_ID => "#FFFFFF",
        EIGHT_ID => "#000000",
        n => match (n - 1) % 8 {
            0 => "#FFD700",
            1 => "#1E90FF",
            2 => "#DC143C",
            3 => "#8A2BE2",
            4 => "#FF4500",
            5 => "#32CD32",
            _ => "#8B0000",
        },
    }
}

/// A ball on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u8,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub kind: BallKind,
}

impl Ball {
    pub fn at_rest(id: u8, pos: DVec2) -> Self {
        Self {
            id,
            pos,
            vel: DVec2::ZERO,
            radius: BALL_RADIUS,
            kind: BallKind::for_id(id),
        }
    }

    /// True while either velocity component exceeds the rest threshold
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel.x.abs() > MIN_VELOCITY || self.vel.y.abs() > MIN_VELOCITY
    }
}

/// A ball that dropped, with where and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketedBall {
    pub ball: Ball,
    /// Index into `Table::pockets`
    pub pocket: usize,
    /// Tick on which the ball dropped
    pub tick: u64,
}

impl PocketedBall {
    #[inline]
    pub fn id(&self) -> u8 {
        self.ball.id
    }
}

/// Live balls plus the fixed table they roll on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    pub table: Table,
    slots: [Option<Ball>; BALL_COUNT],
    /// Ticks simulated since the last rack
    pub time_ticks: u64,
}

impl Default for TableState {
    fn default() -> Self {
        Self::racked()
    }
}

impl TableState {
    /// A table with no balls on it
    pub fn empty(table: Table) -> Self {
        Self {
            table,
            slots: Default::default(),
            time_ticks: 0,
        }
    }

    /// Standard break: cue ball at its spot, 15 balls racked in a triangle
    /// behind the apex with the eight at the rack's center.
    pub fn racked() -> Self {
        let mut state = Self::empty(Table::default());
        state.insert(Ball::at_rest(CUE_ID, DVec2::new(CUE_START.0, CUE_START.1)));
        for (id, pos) in rack_positions() {
            state.insert(Ball::at_rest(id, pos));
        }
        state
    }

    /// Put a ball in its slot, replacing whatever was there
    pub fn insert(&mut self, ball: Ball) {
        let slot = ball.id as usize;
        self.slots[slot] = Some(ball);
    }

    /// Take a ball off the table
    pub fn remove(&mut self, id: u8) -> Option<Ball> {
        self.slots.get_mut(id as usize).and_then(Option::take)
    }

    pub fn get(&self, id: u8) -> Option<&Ball> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: u8) -> Option<&mut Ball> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.get(CUE_ID)
    }

    pub fn cue_ball_mut(&mut self) -> Option<&mut Ball> {
        self.get_mut(CUE_ID)
    }

    /// Live balls in id order
    pub fn balls(&self) -> impl Iterator<Item = &Ball> {
        self.slots.iter().flatten()
    }

    pub fn balls_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.slots.iter_mut().flatten()
    }

    /// Ids of the live balls in id order
    pub fn live_ids(&self) -> Vec<u8> {
        self.balls().map(|b| b.id).collect()
    }

    pub fn live_count(&self) -> usize {
        self.balls().count()
    }

    /// Mutable access to two distinct live balls at once
    pub fn pair_mut(&mut self, a: u8, b: u8) -> Option<(&mut Ball, &mut Ball)> {
        let (a, b) = (a as usize, b as usize);
        if a == b || a >= BALL_COUNT || b >= BALL_COUNT {
            return None;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.slots.split_at_mut(hi);
        let (first, second) = (head[lo].as_mut()?, tail[0].as_mut()?);
        if a < b {
            Some((first, second))
        } else {
            Some((second, first))
        }
    }

    /// True iff any live ball is above the rest threshold
    pub fn balls_moving(&self) -> bool {
        self.balls().any(Ball::is_moving)
    }

    /// Zero out residual sub-threshold velocities once motion has ended
    pub fn settle(&mut self) {
        for ball in self.balls_mut() {
            ball.vel = DVec2::ZERO;
        }
    }

    /// Live object balls belonging to `suit`
    pub fn remaining(&self, suit: Suit) -> usize {
        self.balls()
            .filter(|b| b.kind.suit() == Some(suit))
            .count()
    }
}

/// Triangular rack positions, row by row from the apex. Ball 8 takes the
/// middle of the third row; the others are numbered 1-7, 9-15 in order.
pub fn rack_positions() -> Vec<(u8, DVec2)> {
    let spacing = BALL_RADIUS * 2.0;
    let row_step = spacing * (std::f64::consts::PI / 6.0).cos();
    let mut numbers = (1..=15u8).filter(|&n| n != EIGHT_ID);
    let mut positions = Vec::with_capacity(15);

    for row in 0..RACK_ROWS {
        let x = RACK_APEX.0 + row as f64 * row_step;
        let row_start_y = RACK_APEX.1 - row as f64 * BALL_RADIUS;
        for col in 0..=row {
            let y = row_start_y + col as f64 * spacing;
            let id = if row == 2 && col == 1 {
                EIGHT_ID
            } else {
                match numbers.next() {
                    Some(n) => n,
                    None => break,
                }
            };
            positions.push((id, DVec2::new(x, y)));
        }
    }
    positions
}

/// Where the eight ball sits in a fresh rack
pub fn rack_center() -> DVec2 {
    let row_step = BALL_RADIUS * 2.0 * (std::f64::consts::PI / 6.0).cos();
    DVec2::new(RACK_APEX.0 + 2.0 * row_step, RACK_APEX.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_kinds() {
        assert_eq!(BallKind::for_id(0), BallKind::Cue);
        assert_eq!(BallKind::for_id(7), BallKind::Solid);
        assert_eq!(BallKind::for_id(8), BallKind::Eight);
        assert_eq!(BallKind::for_id(9), BallKind::Stripe);
        assert_eq!(BallKind::for_id(15), BallKind::Stripe);
        assert_eq!(BallKind::Eight.suit(), None);
        assert_eq!(Suit::Solid.complement(), Suit::Stripe);
    }

    #[test]
    fn test_ball_colors() {
        assert_eq!(ball_color(1), ball_color(9));
        assert_eq!(ball_color(7), ball_color(15));
        assert_eq!(ball_color(8), "#000000");
        assert_eq!(ball_color(0), "#FFFFFF");
    }

    #[test]
    fn test_rack() {
        let state = TableState::racked();
        assert_eq!(state.live_count(), 16);
        assert!(!state.balls_moving());
        assert!(state.balls().all(|b| b.vel == DVec2::ZERO));

        let eight = state.get(EIGHT_ID).unwrap();
        assert_eq!(eight.pos, rack_center());
        assert!((eight.pos.y - 200.0).abs() < 1e-12);

        let cue = state.cue_ball().unwrap();
        assert_eq!(cue.pos, DVec2::new(400.0, 200.0));

        // Apex ball is number 1
        assert_eq!(state.get(1).unwrap().pos, DVec2::new(600.0, 200.0));
        assert_eq!(state.remaining(Suit::Solid), 7);
        assert_eq!(state.remaining(Suit::Stripe), 7);
    }

    #[test]
    fn test_rack_ids_unique() {
        let mut ids: Vec<u8> = rack_positions().iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_remove_and_pair_mut() {
        let mut state = TableState::racked();
        assert!(state.remove(CUE_ID).is_some());
        assert!(state.remove(CUE_ID).is_none());
        assert!(state.pair_mut(CUE_ID, 1).is_none());

        let (a, b) = state.pair_mut(5, 2).unwrap();
        assert_eq!((a.id, b.id), (5, 2));
    }
}
