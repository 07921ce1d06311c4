//! Aim drag tracking
//!
//! A drag starts on the cue ball, follows the pointer, and on release turns
//! the pull-back vector into a launch. Pointer capture and coordinate
//! mapping belong to the front end; this only sees table coordinates.

use glam::DVec2;

use crate::consts::MIN_DRAG;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AimDrag {
    start: Option<DVec2>,
    vector: DVec2,
}

impl AimDrag {
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Current pull-back vector (pointer minus press point)
    pub fn vector(&self) -> Option<DVec2> {
        self.start.map(|_| self.vector)
    }

    /// Begin a drag at `point` if it lands within `grab_radius` of the cue ball
    pub fn begin(&mut self, point: DVec2, cue_pos: DVec2, grab_radius: f64) -> bool {
        if point.distance(cue_pos) > grab_radius {
            return false;
        }
        self.start = Some(point);
        self.vector = DVec2::ZERO;
        true
    }

    pub fn update(&mut self, point: DVec2) {
        if let Some(start) = self.start {
            self.vector = point - start;
        }
    }

    /// End the drag. Yields the launch vector unless the pull was too short
    /// to count as a shot.
    pub fn release(&mut self) -> Option<DVec2> {
        self.start.take()?;
        let vector = std::mem::take(&mut self.vector);
        is_shot(vector).then_some(vector)
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

/// True if a drag vector is long enough on either axis to fire
#[inline]
pub fn is_shot(vector: DVec2) -> bool {
    vector.x.abs() > MIN_DRAG || vector.y.abs() > MIN_DRAG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_outside_grab_radius_ignored() {
        let mut drag = AimDrag::default();
        assert!(!drag.begin(DVec2::new(420.0, 200.0), DVec2::new(400.0, 200.0), 10.0));
        assert!(!drag.is_active());
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn test_drag_release_yields_vector() {
        let mut drag = AimDrag::default();
        assert!(drag.begin(DVec2::new(405.0, 200.0), DVec2::new(400.0, 200.0), 10.0));
        drag.update(DVec2::new(355.0, 210.0));
        assert_eq!(drag.vector(), Some(DVec2::new(-50.0, 10.0)));
        assert_eq!(drag.release(), Some(DVec2::new(-50.0, 10.0)));
        assert!(!drag.is_active());
    }

    #[test]
    fn test_tiny_drag_is_not_a_shot() {
        let mut drag = AimDrag::default();
        drag.begin(DVec2::new(400.0, 200.0), DVec2::new(400.0, 200.0), 10.0);
        drag.update(DVec2::new(401.0, 199.5));
        assert_eq!(drag.release(), None);
        assert!(!is_shot(DVec2::ZERO));
    }
}
