// Trail store: the ordered list of recent pointer samples.
// Visual: every entry is one dot in the texture; old dots disappear.

use crate::types::TouchPoint;

/// Squared distance that saturates force at 1.0 (a 0.01 step in uv space).
const FORCE_GAIN: f32 = 10_000.0;

#[derive(Default, Debug, Clone)]
pub struct Trail {
    points: Vec<TouchPoint>, // insertion order == temporal order
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer sample with age 0.
    /// Force comes from the distance to the newest point still in the trail;
    /// an empty trail gives force 0 (a fresh touch leaves no mark).
    pub fn add_touch(&mut self, x: f32, y: f32) {
        let force = match self.points.last() {
            Some(last) => {
                let dx = last.x - x;
                let dy = last.y - y;
                let dd = dx * dx + dy * dy;
                (dd * FORCE_GAIN).min(1.0)
            }
            None => 0.0,
        };
        self.points.push(TouchPoint { x, y, age: 0, force });
    }

    /// Age every point by one frame, then drop those past `max_age`.
    /// Returns how many points were evicted.
    pub fn age_and_evict(&mut self, max_age: u32) -> usize {
        let before = self.points.len();
        self.points.retain_mut(|p| {
            p.age = p.age.saturating_add(1);
            p.age <= max_age
        });
        before - self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_has_no_force() {
        let mut t = Trail::new();
        t.add_touch(0.3, 0.7);
        assert_eq!(t.points()[0].force, 0.0);
        assert_eq!(t.points()[0].age, 0);
    }

    #[test]
    fn force_follows_squared_distance() {
        let mut t = Trail::new();
        t.add_touch(0.5, 0.5);
        t.add_touch(0.503, 0.504); // dd = 0.000025 -> 0.25
        t.add_touch(0.2, 0.1); // far away -> saturates
        let f: Vec<f32> = t.points().iter().map(|p| p.force).collect();
        assert!((f[1] - 0.25).abs() < 1e-3);
        assert_eq!(f[2], 1.0);
        assert!(f.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn adjacent_expired_points_are_all_removed() {
        // Removing in place while walking forward would skip every other one.
        let mut t = Trail::new();
        for i in 0..6 {
            t.add_touch(i as f32 * 0.1, 0.0);
        }
        for _ in 0..3 {
            t.age_and_evict(5);
        }
        t.add_touch(0.9, 0.9);
        let evicted: usize = (0..3).map(|_| t.age_and_evict(5)).sum();
        assert_eq!(evicted, 6);
        assert_eq!(t.len(), 1);
        assert_eq!(t.points()[0].age, 3);
    }

    #[test]
    fn zero_max_age_evicts_on_first_pass() {
        let mut t = Trail::new();
        t.add_touch(0.1, 0.1);
        t.add_touch(0.2, 0.2);
        assert_eq!(t.age_and_evict(0), 2);
        assert!(t.is_empty());
        assert_eq!(t.age_and_evict(0), 0);
    }

    #[test]
    fn order_is_preserved() {
        let mut t = Trail::new();
        t.add_touch(0.1, 0.0);
        t.age_and_evict(10);
        t.add_touch(0.2, 0.0);
        t.add_touch(0.3, 0.0);
        let xs: Vec<f32> = t.points().iter().map(|p| p.x).collect();
        let ages: Vec<u32> = t.points().iter().map(|p| p.age).collect();
        assert_eq!(xs, vec![0.1, 0.2, 0.3]);
        assert_eq!(ages, vec![1, 0, 0]);
    }

    #[test]
    fn force_after_full_eviction_starts_over() {
        let mut t = Trail::new();
        t.add_touch(0.1, 0.1);
        t.age_and_evict(0);
        t.add_touch(0.9, 0.9);
        assert_eq!(t.points()[0].force, 0.0);
    }
}
