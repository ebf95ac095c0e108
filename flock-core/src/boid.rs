use alloc::vec::Vec;

use crate::config::{FlockConfig, FlockId};
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use crate::config::WorldBounds;
#[cfg(feature = "std")]
use rand::Rng;

/// Bounded history of past positions, stored as a ring buffer.
///
/// Once full, each push overwrites the oldest entry in place. Iteration is
/// always chronological, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: Vec<Vector2D>,
    capacity: usize,
    /// Slot holding the oldest point once the buffer has wrapped.
    head: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Vector2D) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() < self.capacity {
            self.points.push(point);
        } else {
            self.points[self.head] = point;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// The most recently pushed point.
    pub fn latest(&self) -> Option<Vector2D> {
        if self.points.is_empty() {
            return None;
        }
        let newest = (self.head + self.points.len() - 1) % self.points.len();
        Some(self.points[newest])
    }

    pub fn iter(&self) -> impl Iterator<Item = Vector2D> + '_ {
        let len = self.points.len();
        (0..len).map(move |i| self.points[(self.head + i) % len])
    }

    /// Changes the capacity, keeping the newest points that still fit.
    pub fn resize(&mut self, capacity: usize) {
        let len = self.points.len();
        let keep = len.min(capacity);
        let mut points = Vec::with_capacity(capacity);
        points.extend(self.iter().skip(len - keep));
        self.points = points;
        self.capacity = capacity;
        self.head = 0;
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.head = 0;
    }
}

/// A single boid entity
#[derive(Debug, Clone)]
pub struct Boid {
    pub flock: FlockId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub trail: Trail,
}

impl Boid {
    pub fn new(flock: FlockId, config: &FlockConfig, position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            flock,
            position,
            velocity,
            trail: Trail::with_capacity(config.tracer.length),
        }
    }

    /// Spawns a boid anywhere inside `bounds`, moving in a random direction
    /// no faster than the flock's speed cap.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        flock: FlockId,
        config: &FlockConfig,
        bounds: &WorldBounds,
    ) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..bounds.width),
            rng.gen_range(0.0..bounds.height),
        );
        let velocity = Vector2D::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
            * config.max_speed;
        Self::new(flock, config, position, velocity.limit(config.max_speed))
    }

    pub fn in_range(&self, other: &Boid, sight_range: f32) -> bool {
        self.position.distance_squared(&other.position) <= sight_range * sight_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn points(trail: &Trail) -> Vec<(f32, f32)> {
        trail.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_trail_keeps_chronological_order() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..2 {
            trail.push(Vector2D::new(i as f32, 0.0));
        }
        assert_eq!(points(&trail), vec![(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(trail.latest(), Some(Vector2D::new(1.0, 0.0)));
    }

    #[test]
    fn test_trail_evicts_oldest_when_full() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..7 {
            trail.push(Vector2D::new(i as f32, 0.0));
            assert!(trail.len() <= 3);
        }
        assert_eq!(points(&trail), vec![(4.0, 0.0), (5.0, 0.0), (6.0, 0.0)]);
        assert_eq!(trail.latest(), Some(Vector2D::new(6.0, 0.0)));
    }

    #[test]
    fn test_trail_zero_capacity_stays_empty() {
        let mut trail = Trail::with_capacity(0);
        trail.push(Vector2D::new(1.0, 1.0));
        assert!(trail.is_empty());
        assert_eq!(trail.latest(), None);
    }

    #[test]
    fn test_trail_clear() {
        let mut trail = Trail::with_capacity(2);
        for i in 0..5 {
            trail.push(Vector2D::new(i as f32, 0.0));
        }
        trail.clear();
        assert!(trail.is_empty());
        trail.push(Vector2D::new(9.0, 9.0));
        assert_eq!(points(&trail), vec![(9.0, 9.0)]);
    }

    #[test]
    fn test_trail_resize_keeps_newest_points() {
        let mut trail = Trail::with_capacity(5);
        for i in 0..7 {
            trail.push(Vector2D::new(i as f32, 0.0));
        }
        trail.resize(2);
        assert_eq!(trail.capacity(), 2);
        assert_eq!(points(&trail), vec![(5.0, 0.0), (6.0, 0.0)]);

        trail.push(Vector2D::new(7.0, 0.0));
        assert_eq!(points(&trail), vec![(6.0, 0.0), (7.0, 0.0)]);

        trail.resize(4);
        trail.push(Vector2D::new(8.0, 0.0));
        assert_eq!(points(&trail), vec![(6.0, 0.0), (7.0, 0.0), (8.0, 0.0)]);
    }

    #[test]
    fn test_boid_creation() {
        let config = FlockConfig::default();
        let boid = Boid::new(2, &config, Vector2D::new(10.0, 20.0), Vector2D::new(1.0, 1.0));

        assert_eq!(boid.flock, 2);
        assert_eq!(boid.position, Vector2D::new(10.0, 20.0));
        assert_eq!(boid.velocity, Vector2D::new(1.0, 1.0));
        assert_eq!(boid.trail.capacity(), config.tracer.length);
        assert!(boid.trail.is_empty());
    }

    #[test]
    fn test_random_boid_inside_bounds_and_under_speed_cap() {
        let config = FlockConfig {
            max_speed: 3.0,
            ..FlockConfig::default()
        };
        let bounds = WorldBounds::new(200.0, 100.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let boid = Boid::random(&mut rng, 0, &config, &bounds);
            assert!((0.0..200.0).contains(&boid.position.x));
            assert!((0.0..100.0).contains(&boid.position.y));
            assert!(boid.velocity.magnitude() <= 3.0 + 1e-5);
        }
    }
}
