//! Read-only views handed to renderers.

use crate::boid::{Boid, Trail};
use crate::color::Rgb;
use crate::config::{FlockConfig, FlockId, WorldBounds};
use crate::vector::Vector2D;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Number of steps completed before this frame.
    pub step: u64,
    pub bounds: WorldBounds,
    pub background_color: Rgb,
    pub(crate) boids: &'a [Boid],
    pub(crate) flocks: &'a [FlockConfig],
    pub(crate) trail_colors: &'a [Rgb],
}

impl<'a> Frame<'a> {
    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn flocks(&self) -> &'a [FlockConfig] {
        self.flocks
    }

    pub fn boids(&self) -> impl Iterator<Item = BoidView<'a>> + 'a {
        let flocks = self.flocks;
        let trail_colors = self.trail_colors;
        self.boids.iter().map(move |boid| {
            let flock = &flocks[boid.flock];
            BoidView {
                flock: boid.flock,
                position: boid.position,
                velocity: boid.velocity,
                color: flock.color,
                trail_color: trail_colors[boid.flock],
                trail: flock.tracer.enabled.then_some(&boid.trail),
            }
        })
    }
}

/// One boid as seen by a renderer.
#[derive(Debug, Clone, Copy)]
pub struct BoidView<'a> {
    pub flock: FlockId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub color: Rgb,
    pub trail_color: Rgb,
    trail: Option<&'a Trail>,
}

impl<'a> BoidView<'a> {
    /// Past positions, oldest first. Empty when the flock's tracer is disabled.
    pub fn trail(&self) -> impl Iterator<Item = Vector2D> + 'a {
        self.trail.into_iter().flat_map(|trail| trail.iter())
    }
}
