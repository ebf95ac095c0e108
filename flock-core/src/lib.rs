#![cfg_attr(not(feature = "std"), no_std)]

//! Multi-flock boid simulation engine.
//!
//! Boids steer by alignment, cohesion and separation within their own flock,
//! pursue or flee other flocks through signed affinities, and are pushed
//! back inside the world rectangle. [`Simulation`] owns the population and
//! advances it one step at a time; rendering and windowing are left to the
//! caller through [`Frame`].

extern crate alloc;

pub mod boid;
#[cfg(feature = "std")]
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod neighbors;
pub mod render;
pub mod simulation;
pub mod vector;

pub use boid::{Boid, Trail};
#[cfg(feature = "std")]
pub use clock::{SimulationClock, StopHandle};
pub use color::Rgb;
pub use config::{AffinityLink, FlockConfig, FlockId, SimulationSettings, TracerConfig, WorldBounds};
pub use error::ConfigError;
pub use forces::SteeringForces;
pub use neighbors::{BruteForce, NeighborQuery, Neighbors, UniformGrid};
pub use render::{BoidView, Frame};
pub use simulation::Simulation;
pub use vector::Vector2D;
