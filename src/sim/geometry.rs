//! Table geometry: play-area bounds and the six pockets
//!
//! Coordinates are table-relative with the origin at the top-left corner,
//! x to the right and y down.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Number of pockets on the table
pub const POCKET_COUNT: usize = 6;

/// Fixed table layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub width: f64,
    pub height: f64,
    pub pocket_radius: f64,
    /// Corner and side pocket centers, top row left to right then bottom row
    pub pockets: [DVec2; POCKET_COUNT],
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TABLE_WIDTH, TABLE_HEIGHT, POCKET_RADIUS, BALL_RADIUS)
    }
}

impl Table {
    /// Build a table whose pockets sit one ball radius in from each corner
    /// and at the middle of each long rail.
    pub fn new(width: f64, height: f64, pocket_radius: f64, inset: f64) -> Self {
        let mid = width / 2.0;
        Self {
            width,
            height,
            pocket_radius,
            pockets: [
                DVec2::new(inset, inset),
                DVec2::new(mid, inset),
                DVec2::new(width - inset, inset),
                DVec2::new(inset, height - inset),
                DVec2::new(mid, height - inset),
                DVec2::new(width - inset, height - inset),
            ],
        }
    }

    /// True if a circle of `radius` at `pos` lies fully on the table
    pub fn contains(&self, pos: DVec2, radius: f64) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height
    }

    /// Clamp a ball center into `[radius, dimension - radius]` on both axes
    #[inline]
    pub fn clamp_inside(&self, pos: DVec2, radius: f64) -> DVec2 {
        DVec2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }

    /// Index of the first pocket capturing a ball of `radius` at `pos`
    pub fn pocket_at(&self, pos: DVec2, radius: f64) -> Option<usize> {
        let reach = self.pocket_radius + radius;
        self.pockets
            .iter()
            .position(|pocket| pos.distance(*pocket) < reach)
    }

    /// True if `pos` keeps a ball of `radius` clear of every pocket
    pub fn clear_of_pockets(&self, pos: DVec2, radius: f64) -> bool {
        self.pocket_at(pos, radius).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pocket_layout() {
        let table = Table::default();
        assert_eq!(table.pockets[0], DVec2::new(10.0, 10.0));
        assert_eq!(table.pockets[1], DVec2::new(400.0, 10.0));
        assert_eq!(table.pockets[5], DVec2::new(790.0, 390.0));
    }

    #[test]
    fn test_contains() {
        let table = Table::default();
        assert!(table.contains(DVec2::new(10.0, 10.0), 10.0));
        assert!(!table.contains(DVec2::new(9.0, 200.0), 10.0));
        assert!(!table.contains(DVec2::new(400.0, 395.0), 10.0));
    }

    #[test]
    fn test_pocket_capture_radius() {
        let table = Table::default();
        // Reach is pocket radius + ball radius = 28
        assert_eq!(table.pocket_at(DVec2::new(37.9, 10.0), 10.0), Some(0));
        assert_eq!(table.pocket_at(DVec2::new(38.0, 10.0), 10.0), None);
        assert_eq!(table.pocket_at(DVec2::new(400.0, 380.0), 10.0), Some(4));
    }

    #[test]
    fn test_clamp_inside() {
        let table = Table::default();
        let clamped = table.clamp_inside(DVec2::new(-5.0, 500.0), 10.0);
        assert_eq!(clamped, DVec2::new(10.0, 390.0));
    }
}
