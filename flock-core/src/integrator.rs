use crate::boid::Boid;
use crate::config::{FlockConfig, WorldBounds};
use crate::vector::Vector2D;

/// Inward push for a position that has crossed, or come within
/// `bounds.margin` of, any edge of the world.
pub fn boundary_correction(position: Vector2D, bounds: &WorldBounds, force: f32) -> Vector2D {
    let mut correction = Vector2D::zero();

    if position.x < bounds.margin {
        correction.x += force;
    } else if position.x > bounds.width - bounds.margin {
        correction.x -= force;
    }

    if position.y < bounds.margin {
        correction.y += force;
    } else if position.y > bounds.height - bounds.margin {
        correction.y -= force;
    }

    correction
}

/// Advances one boid by one step.
///
/// The speed cap is applied before boundary correction, so a boid being
/// turned back at an edge may briefly exceed `max_speed`. The trail records
/// the position the boid held before moving.
pub fn integrate(
    boid: &mut Boid,
    acceleration: Vector2D,
    config: &FlockConfig,
    bounds: &WorldBounds,
    step_length: f32,
) {
    boid.velocity += acceleration;
    boid.velocity = boid.velocity.limit(config.max_speed);
    boid.velocity += boundary_correction(boid.position, bounds, config.boundary_force);

    boid.trail.push(boid.position);
    boid.position += boid.velocity * step_length;
}
