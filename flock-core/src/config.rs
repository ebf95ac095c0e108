//! Validated simulation settings.
//!
//! [`FlockConfig`] and [`SimulationSettings`] are plain records. They are
//! checked once by [`SimulationSettings::validate`] before any boid is
//! spawned, and never change afterwards.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::color::Rgb;
use crate::error::ConfigError;

/// Index of a flock inside [`SimulationSettings::flocks`].
pub type FlockId = usize;

/// Trail retention and display settings for one flock.
#[derive(Debug, Clone, PartialEq)]
pub struct TracerConfig {
    /// Maximum number of past positions kept per boid.
    pub length: usize,
    /// How much lighter than the flock color the trail is drawn.
    pub shade: f32,
    pub enabled: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            length: 20,
            shade: 0.5,
            enabled: true,
        }
    }
}

/// Tuning parameters for one flock.
#[derive(Debug, Clone, PartialEq)]
pub struct FlockConfig {
    /// Only needed when another flock targets this one through affinity.
    pub id: Option<String>,
    pub count: usize,
    pub alignment: f32,
    pub separation: f32,
    pub cohesion: f32,
    pub min_separation: f32,
    pub max_speed: f32,
    pub boundary_force: f32,
    pub sight_range: f32,
    /// Target flock id to signed strength. Positive pursues, negative flees.
    pub affinity: BTreeMap<String, f32>,
    pub color: Rgb,
    pub tracer: TracerConfig,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            id: None,
            count: 30,
            alignment: 0.05,
            separation: 0.05,
            cohesion: 0.005,
            min_separation: 15.0,
            max_speed: 120.0,
            boundary_force: 10.0,
            sight_range: 60.0,
            affinity: BTreeMap::new(),
            color: Rgb::new(200, 200, 200),
            tracer: TracerConfig::default(),
        }
    }
}

impl FlockConfig {
    /// Label used in error messages, e.g. `flock #0 ("prey")`.
    pub fn label(&self, index: FlockId) -> String {
        match &self.id {
            Some(id) => format!("flock #{} (\"{}\")", index, id),
            None => format!("flock #{}", index),
        }
    }

    /// Checks every numeric field. Affinity targets are checked by
    /// [`SimulationSettings::validate`], which knows the other flocks.
    pub fn validate(&self, index: FlockId) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &'static str| ConfigError::InvalidField {
            flock: self.label(index),
            field,
            reason,
        };

        if self.count == 0 {
            return Err(invalid("count", "must be at least 1"));
        }

        let positive = [
            ("min_separation", self.min_separation),
            ("max_speed", self.max_speed),
            ("sight_range", self.sight_range),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
            if value <= 0.0 {
                return Err(invalid(field, "must be positive"));
            }
        }

        let non_negative = [
            ("alignment", self.alignment),
            ("separation", self.separation),
            ("cohesion", self.cohesion),
            ("boundary_force", self.boundary_force),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        if !self.tracer.shade.is_finite() {
            return Err(invalid("tracer.shade", "must be a finite number"));
        }

        Ok(())
    }
}

/// The rectangle boids are kept inside, with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    /// Distance from an edge at which boundary correction starts.
    pub margin: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin: 0.0,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_side = |side: f32| side.is_finite() && side > 0.0;
        if !valid_side(self.width) || !valid_side(self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::InvalidBoundaryMargin(self.margin));
        }
        Ok(())
    }
}

/// Everything needed to start a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Seconds per step. Scales displacement and paces the clock.
    pub step_length: f32,
    pub bounds: WorldBounds,
    pub background_color: Rgb,
    /// Seed for spawning. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub flocks: Vec<FlockConfig>,
}

/// An affinity entry with its target id resolved to a flock index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinityLink {
    pub target: FlockId,
    pub value: f32,
}

impl SimulationSettings {
    pub fn new(step_length: f32, bounds: WorldBounds, flocks: Vec<FlockConfig>) -> Self {
        Self {
            step_length,
            bounds,
            background_color: Rgb::default(),
            seed: None,
            flocks,
        }
    }

    /// Validates all settings and resolves every affinity entry to a flock
    /// index. The returned table is indexed by flock.
    pub fn validate(&self) -> Result<Vec<Vec<AffinityLink>>, ConfigError> {
        if !self.step_length.is_finite() || self.step_length < 0.0 {
            return Err(ConfigError::InvalidStepLength(self.step_length));
        }
        self.bounds.validate()?;

        let mut ids: BTreeMap<&str, FlockId> = BTreeMap::new();
        for (index, flock) in self.flocks.iter().enumerate() {
            flock.validate(index)?;
            if let Some(id) = flock.id.as_deref() {
                if ids.insert(id, index).is_some() {
                    return Err(ConfigError::DuplicateFlockId(String::from(id)));
                }
            }
        }

        self.flocks
            .iter()
            .enumerate()
            .map(|(index, flock)| {
                flock
                    .affinity
                    .iter()
                    .map(|(target, &value)| -> Result<AffinityLink, ConfigError> {
                        let target_index = *ids.get(target.as_str()).ok_or_else(|| {
                            ConfigError::UnknownAffinityTarget {
                                flock: flock.label(index),
                                target: target.clone(),
                            }
                        })?;
                        if !value.is_finite() {
                            return Err(ConfigError::InvalidAffinityValue {
                                flock: flock.label(index),
                                target: target.clone(),
                            });
                        }
                        Ok(AffinityLink {
                            target: target_index,
                            value,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }
}
