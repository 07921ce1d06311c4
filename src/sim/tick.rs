//! Fixed timestep physics tick
//!
//! One call to `advance_tick` is one simulation step. Nothing here reads a
//! clock: the same starting table always produces the same positions and
//! pocket events.

use super::collision::{integrate, reflect_off_cushions, resolve_ball_pair};
use super::state::{PocketedBall, TableState};
use crate::consts::*;

/// Advance every live ball by one tick and return the balls that dropped,
/// in id order.
///
/// Steps, in order: integrate and damp, cushion reflection, pairwise
/// resolution over `i < j`, a containment clamp, then pocket detection.
/// Pair resolution is order dependent; balls move a small fraction of their
/// radius per tick so the approximation holds.
pub fn advance_tick(state: &mut TableState) -> Vec<PocketedBall> {
    state.time_ticks += 1;
    let table = state.table.clone();

    for ball in state.balls_mut() {
        integrate(ball);
        reflect_off_cushions(ball, &table);
    }

    let ids = state.live_ids();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if let Some((first, second)) = state.pair_mut(a, b) {
                resolve_ball_pair(first, second);
            }
        }
    }

    // Pair separation can nudge a ball past a cushion
    for ball in state.balls_mut() {
        ball.pos = table.clamp_inside(ball.pos, ball.radius);
    }

    let mut pocketed = Vec::new();
    for id in ids {
        let Some(ball) = state.get(id) else {
            continue;
        };
        if let Some(pocket) = table.pocket_at(ball.pos, ball.radius) {
            if let Some(ball) = state.remove(id) {
                pocketed.push(PocketedBall {
                    ball,
                    pocket,
                    tick: state.time_ticks,
                });
            }
        }
    }
    pocketed
}

/// Converts external frame time into whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator: f64,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `dt` seconds of frame time and return how many ticks are due,
    /// capped at `MAX_SUBSTEPS`. Time beyond the cap is dropped.
    pub fn ticks_due(&mut self, dt: f64) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }
}
