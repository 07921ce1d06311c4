//! Collision detection and response
//!
//! Cushions are perfect reflectors. Ball-ball contacts use the equal-mass
//! elastic transfer along the line of centers: the relative velocity's
//! normal component moves from one ball to the other, tangential parts are
//! untouched.

use glam::DVec2;

use super::geometry::Table;
use super::state::Ball;
use crate::consts::*;

/// Separation axis used when two centers coincide exactly
const FALLBACK_NORMAL: DVec2 = DVec2::X;

/// Result of a ball-ball overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first ball's center toward the second's
    pub normal: DVec2,
    /// How far the two balls interpenetrate
    pub overlap: f64,
}

/// Move a ball by its velocity, then apply felt friction and snap slow
/// components to exactly zero so balls come to a true rest.
#[inline]
pub fn integrate(ball: &mut Ball) {
    ball.pos += ball.vel;
    ball.vel *= FRICTION;
    if ball.vel.x.abs() < MIN_VELOCITY {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < MIN_VELOCITY {
        ball.vel.y = 0.0;
    }
}

/// Reflect off any cushion the ball has reached and clamp it back onto the
/// table. Returns true if a cushion was touched.
///
/// Only a velocity component heading into the cushion is flipped, so a ball
/// already moving away is left alone.
pub fn reflect_off_cushions(ball: &mut Ball, table: &Table) -> bool {
    let r = ball.radius;
    let mut hit = false;

    if ball.pos.x - r <= 0.0 {
        ball.vel.x = ball.vel.x.abs();
        hit = true;
    } else if ball.pos.x + r >= table.width {
        ball.vel.x = -ball.vel.x.abs();
        hit = true;
    }

    if ball.pos.y - r <= 0.0 {
        ball.vel.y = ball.vel.y.abs();
        hit = true;
    } else if ball.pos.y + r >= table.height {
        ball.vel.y = -ball.vel.y.abs();
        hit = true;
    }

    if hit {
        ball.pos = table.clamp_inside(ball.pos, r);
    }
    hit
}

/// Check whether two balls overlap
pub fn ball_contact(a: &Ball, b: &Ball) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let min_distance = a.radius + b.radius;

    if distance >= min_distance {
        return None;
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        FALLBACK_NORMAL
    };
    Some(Contact {
        normal,
        overlap: min_distance - distance,
    })
}

/// Resolve an overlapping pair. Each ball backs off half the overlap along
/// the normal, then the normal component of the relative velocity is
/// transferred. Returns true if the balls were in contact.
pub fn resolve_ball_pair(a: &mut Ball, b: &mut Ball) -> bool {
    let Some(contact) = ball_contact(a, b) else {
        return false;
    };
    let n = contact.normal;

    let push = n * (contact.overlap / 2.0);
    a.pos -= push;
    b.pos += push;

    let transfer = (a.vel - b.vel).dot(n);
    a.vel -= n * transfer;
    b.vel += n * transfer;
    true
}
