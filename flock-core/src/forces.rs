//! Steering rules.
//!
//! Each rule reads the boid, the neighbors it can see and its flock's
//! weights, and returns one velocity change. Rules never mutate the boid,
//! so every boid in a step can be evaluated against the same snapshot.

use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::neighbors::{AffinityGroup, Neighbors};
use crate::vector::Vector2D;

/// The four steering contributions for one boid in one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub separation: Vector2D,
    pub affinity: Vector2D,
}

impl SteeringForces {
    /// The unweighted sum of all contributions.
    pub fn total(&self) -> Vector2D {
        self.alignment + self.cohesion + self.separation + self.affinity
    }
}

fn members<'a>(boids: &'a [Boid], indices: &'a [usize]) -> impl Iterator<Item = &'a Boid> + 'a {
    indices.iter().map(move |&i| &boids[i])
}

fn centroid<'a, I>(boids: I) -> Option<Vector2D>
where
    I: Iterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;
    for boid in boids {
        sum += boid.position;
        count += 1;
    }
    if count > 0 {
        Some(sum / count as f32)
    } else {
        None
    }
}

/// Mean velocity of the cohort, scaled by the alignment weight.
pub fn alignment<'a, I>(others: I, config: &FlockConfig) -> Vector2D
where
    I: Iterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;
    for other in others {
        sum += other.velocity;
        count += 1;
    }

    if count > 0 {
        sum / count as f32 * config.alignment
    } else {
        Vector2D::zero()
    }
}

/// Pull toward the centroid of the cohort.
pub fn cohesion<'a, I>(boid: &Boid, others: I, config: &FlockConfig) -> Vector2D
where
    I: Iterator<Item = &'a Boid>,
{
    match centroid(others) {
        Some(center) => (center - boid.position) * config.cohesion,
        None => Vector2D::zero(),
    }
}

/// Push away from every cohort member closer than `min_separation`.
///
/// Each push is a unit vector divided by the distance, so the closest
/// neighbors dominate. A neighbor at exactly the same position has no
/// defined direction and contributes nothing.
pub fn separation<'a, I>(boid: &Boid, others: I, config: &FlockConfig) -> Vector2D
where
    I: Iterator<Item = &'a Boid>,
{
    let mut steering = Vector2D::zero();

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.min_separation {
            let away = (boid.position - other.position).normalize();
            steering += away / distance;
        }
    }

    steering * config.separation
}

/// Pursue or flee the centroid of each affinity target's visible members.
///
/// The sign of the affinity value picks the direction and its magnitude
/// scales the pull. Targets with nobody in sight contribute nothing.
pub fn affinity(boid: &Boid, boids: &[Boid], groups: &[AffinityGroup]) -> Vector2D {
    let mut steering = Vector2D::zero();

    for group in groups {
        if let Some(center) = centroid(members(boids, &group.members)) {
            steering += (center - boid.position) * group.link.value;
        }
    }

    steering
}

/// Evaluates every rule for `boids[index]`.
pub fn steering(
    boids: &[Boid],
    index: usize,
    neighbors: &Neighbors,
    config: &FlockConfig,
) -> SteeringForces {
    let boid = &boids[index];
    let cohort = &neighbors.cohort;

    SteeringForces {
        alignment: alignment(members(boids, cohort), config),
        cohesion: cohesion(boid, members(boids, cohort), config),
        separation: separation(boid, members(boids, cohort), config),
        affinity: affinity(boid, boids, &neighbors.affinity),
    }
}
