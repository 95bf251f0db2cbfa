//! Circle collision queries
//!
//! Everything collides as a circle. Queries are plain linear scans in storage
//! order, so tie-breaks depend only on collection order.

use glam::Vec2;

/// True when two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Index of the entry closest to `origin` strictly within `range`
///
/// Earlier entries win exact ties.
pub fn nearest_within<T>(
    items: &[T],
    origin: Vec2,
    range: f32,
    pos: impl Fn(&T) -> Vec2,
) -> Option<usize> {
    let mut best = None;
    let mut best_dist = range;
    for (i, item) in items.iter().enumerate() {
        let d = origin.distance(pos(item));
        if d < best_dist {
            best_dist = d;
            best = Some(i);
        }
    }
    best
}

/// Index of the first entry, in storage order, whose circle overlaps the probe
pub fn first_overlapping<T>(
    items: &[T],
    probe: Vec2,
    probe_radius: f32,
    circle: impl Fn(&T) -> (Vec2, f32),
) -> Option<usize> {
    items.iter().position(|item| {
        let (pos, radius) = circle(item);
        circles_overlap(probe, probe_radius, pos, radius)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_nearest_within_range() {
        let points = [
            Vec2::new(300.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(700.0, 0.0),
        ];
        assert_eq!(nearest_within(&points, Vec2::ZERO, 600.0, |p| *p), Some(1));
        assert_eq!(nearest_within(&points, Vec2::ZERO, 50.0, |p| *p), None);
    }

    #[test]
    fn test_nearest_within_prefers_first_on_tie() {
        let points = [Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)];
        assert_eq!(nearest_within(&points, Vec2::ZERO, 600.0, |p| *p), Some(0));
    }

    #[test]
    fn test_first_overlapping_uses_storage_order() {
        // Second circle is closer to the probe but the first still wins.
        let circles = [(Vec2::new(8.0, 0.0), 10.0), (Vec2::new(1.0, 0.0), 10.0)];
        assert_eq!(
            first_overlapping(&circles, Vec2::ZERO, 4.0, |c| *c),
            Some(0)
        );
        assert_eq!(
            first_overlapping(&circles, Vec2::new(100.0, 0.0), 4.0, |c| *c),
            None
        );
    }
}
