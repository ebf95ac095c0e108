use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::boid::Boid;
use crate::color::Rgb;
use crate::config::{AffinityLink, FlockConfig, FlockId, SimulationSettings, WorldBounds};
use crate::error::ConfigError;
use crate::forces;
use crate::integrator;
use crate::neighbors::{BruteForce, NeighborQuery};
use crate::render::Frame;
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A population of boids across all configured flocks.
///
/// Each [`step`](Simulation::step) computes every boid's acceleration from
/// the state left by the previous step, then commits all updates. Update
/// order within a step therefore never affects the result.
pub struct Simulation {
    settings: SimulationSettings,
    affinity: Vec<Vec<AffinityLink>>,
    trail_colors: Vec<Rgb>,
    boids: Vec<Boid>,
    query: Box<dyn NeighborQuery>,
    steps: u64,
}

impl core::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Simulation")
            .field("flocks", &self.settings.flocks.len())
            .field("boids", &self.boids.len())
            .field("steps", &self.steps)
            .finish()
    }
}

impl Simulation {
    /// Builds a simulation from an explicit population. Every boid must
    /// belong to a configured flock and have a finite position and velocity.
    /// Trails are resized to the tracer length of the boid's own flock.
    pub fn from_boids(settings: SimulationSettings, mut boids: Vec<Boid>) -> Result<Self, ConfigError> {
        let affinity = settings.validate()?;

        for (index, boid) in boids.iter_mut().enumerate() {
            let flock = settings
                .flocks
                .get(boid.flock)
                .ok_or(ConfigError::UnknownFlock(boid.flock))?;
            if !boid.position.is_finite() || !boid.velocity.is_finite() {
                return Err(ConfigError::NonFiniteBoid(index));
            }
            if boid.trail.capacity() != flock.tracer.length {
                log::debug!(
                    "Resizing trail of boid {} from {} to {} points",
                    index,
                    boid.trail.capacity(),
                    flock.tracer.length
                );
                boid.trail.resize(flock.tracer.length);
            }
        }

        Ok(Self::assemble(settings, affinity, boids))
    }

    /// Wraps an already validated population.
    fn assemble(settings: SimulationSettings, affinity: Vec<Vec<AffinityLink>>, boids: Vec<Boid>) -> Self {
        let trail_colors = settings
            .flocks
            .iter()
            .map(|flock| flock.color.lighten(flock.tracer.shade))
            .collect();

        Self {
            settings,
            affinity,
            trail_colors,
            boids,
            query: Box::new(BruteForce),
            steps: 0,
        }
    }

    /// Validates `settings` and spawns `count` boids per flock, seeded from
    /// `settings.seed` or from the OS when no seed is given.
    #[cfg(feature = "std")]
    pub fn start(mut settings: SimulationSettings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or_else(entropy_seed);
        settings.seed = Some(seed);
        log::info!("Spawning flocks with seed {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::start_with_rng(settings, &mut rng)
    }

    #[cfg(feature = "std")]
    pub fn start_with_rng<R: Rng + ?Sized>(
        settings: SimulationSettings,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        // Validate before spawning so bad bounds never reach the RNG.
        let affinity = settings.validate()?;

        let mut boids = Vec::with_capacity(settings.flocks.iter().map(|f| f.count).sum());
        for (index, flock) in settings.flocks.iter().enumerate() {
            log::debug!("Spawning {} boids for {}", flock.count, flock.label(index));
            boids.extend(
                (0..flock.count).map(|_| Boid::random(&mut *rng, index, flock, &settings.bounds)),
            );
        }

        Ok(Self::assemble(settings, affinity, boids))
    }

    /// Replaces the neighbor lookup strategy.
    pub fn with_neighbor_query<Q: NeighborQuery + 'static>(mut self, query: Q) -> Self {
        self.query = Box::new(query);
        self
    }

    /// Advances every boid by one step.
    pub fn step(&mut self) {
        let flocks = &self.settings.flocks;
        self.query.prepare(&self.boids, flocks);

        let accelerations: Vec<Vector2D> = (0..self.boids.len())
            .map(|index| {
                let flock = self.boids[index].flock;
                let config = &flocks[flock];
                let neighbors =
                    self.query
                        .neighbors(&self.boids, index, config.sight_range, &self.affinity[flock]);
                forces::steering(&self.boids, index, &neighbors, config).total()
            })
            .collect();

        let bounds = self.settings.bounds;
        let step_length = self.settings.step_length;
        for (boid, acceleration) in self.boids.iter_mut().zip(accelerations) {
            integrator::integrate(boid, acceleration, &flocks[boid.flock], &bounds, step_length);
        }

        self.steps += 1;
    }

    /// Discards all boids. The simulation cannot be stepped afterwards.
    pub fn stop(self) {
        log::info!(
            "Stopping simulation after {} steps ({} boids)",
            self.steps,
            self.boids.len()
        );
    }

    /// Changes the world rectangle, e.g. after a window resize. Boundary
    /// correction uses the new rectangle from the next step on.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let bounds = WorldBounds {
            width,
            height,
            ..self.settings.bounds
        };
        bounds.validate()?;
        log::debug!("World resized to {}x{}", width, height);
        self.settings.bounds = bounds;
        Ok(())
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            step: self.steps,
            bounds: self.settings.bounds,
            background_color: self.settings.background_color,
            boids: &self.boids,
            flocks: &self.settings.flocks,
            trail_colors: &self.trail_colors,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn flocks(&self) -> &[FlockConfig] {
        &self.settings.flocks
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn bounds(&self) -> WorldBounds {
        self.settings.bounds
    }

    pub fn step_length(&self) -> f32 {
        self.settings.step_length
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn flock_by_id(&self, id: &str) -> Option<FlockId> {
        self.settings
            .flocks
            .iter()
            .position(|flock| flock.id.as_deref() == Some(id))
    }

    /// Mean position of a flock's boids, or `None` if it has none.
    pub fn flock_center(&self, flock: FlockId) -> Option<Vector2D> {
        let mut sum = Vector2D::zero();
        let mut count = 0;
        for boid in self.boids.iter().filter(|b| b.flock == flock) {
            sum += boid.position;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }
}

#[cfg(feature = "std")]
fn entropy_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(err) => {
            log::warn!("OS randomness unavailable ({}), seeding from the clock", err);
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        }
    }
}
