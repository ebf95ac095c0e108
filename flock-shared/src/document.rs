use std::collections::BTreeMap;

use flock_core::{
    ConfigError, FlockConfig, Rgb, SimulationSettings, TracerConfig, WorldBounds,
};
use serde::{Deserialize, Serialize};

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDocument {
    pub simulation: SimulationSection,
    pub window: WindowSection,
    pub flocks: Vec<FlockDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationSection {
    /// Seconds per step.
    pub step_length: f32,
    /// Spawn seed. Omit for a different start every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowSection {
    /// `[width, height]` of the world rectangle.
    pub dimensions: [f32; 2],
    #[serde(default)]
    pub background_color: [u8; 3],
    /// Distance from an edge at which boids start being pushed back.
    #[serde(default)]
    pub boundary_margin: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TracerSection {
    pub length: usize,
    pub shade: f32,
    pub enabled: bool,
}

/// Affinity toward other flocks, keyed by flock id.
///
/// Accepts either a table (`{ prey = 0.05 }` in TOML, `{"prey": 0.05}` in
/// JSON) or a list of pairs (`[["prey", 0.05]]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AffinityTable {
    Map(BTreeMap<String, f32>),
    Pairs(Vec<(String, f32)>),
}

impl Default for AffinityTable {
    fn default() -> Self {
        AffinityTable::Map(BTreeMap::new())
    }
}

impl AffinityTable {
    pub fn into_map(self) -> BTreeMap<String, f32> {
        match self {
            AffinityTable::Map(map) => map,
            AffinityTable::Pairs(pairs) => {
                let mut map = BTreeMap::new();
                for (id, value) in pairs {
                    if map.insert(id.clone(), value).is_some() {
                        log::warn!("Affinity toward \"{}\" listed twice, keeping the last value", id);
                    }
                }
                map
            }
        }
    }
}

/// One entry of the `flocks` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub count: usize,
    #[serde(default)]
    pub affinity: AffinityTable,
    pub alignment: f32,
    pub separation: f32,
    pub cohesion: f32,
    pub min_separation: f32,
    pub max_speed: f32,
    pub boundary_force: f32,
    pub sight_range: f32,
    pub color: [u8; 3],
    pub tracer: TracerSection,
}

impl From<FlockDocument> for FlockConfig {
    fn from(doc: FlockDocument) -> Self {
        FlockConfig {
            id: doc.id,
            count: doc.count,
            alignment: doc.alignment,
            separation: doc.separation,
            cohesion: doc.cohesion,
            min_separation: doc.min_separation,
            max_speed: doc.max_speed,
            boundary_force: doc.boundary_force,
            sight_range: doc.sight_range,
            affinity: doc.affinity.into_map(),
            color: Rgb::from(doc.color),
            tracer: TracerConfig {
                length: doc.tracer.length,
                shade: doc.tracer.shade,
                enabled: doc.tracer.enabled,
            },
        }
    }
}

impl SimulationDocument {
    /// Converts the document into engine settings, validating them so an
    /// invalid document never reaches [`flock_core::Simulation::start`].
    pub fn into_settings(self) -> Result<SimulationSettings, ConfigError> {
        let [width, height] = self.window.dimensions;
        let bounds = WorldBounds::new(width, height).with_margin(self.window.boundary_margin);

        let mut settings = SimulationSettings::new(
            self.simulation.step_length,
            bounds,
            self.flocks.into_iter().map(FlockConfig::from).collect(),
        );
        settings.background_color = Rgb::from(self.window.background_color);
        settings.seed = self.simulation.seed;

        settings.validate()?;
        Ok(settings)
    }
}
