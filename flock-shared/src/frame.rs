use flock_core::{Frame, Vector2D};
use serde::{Deserialize, Serialize};

/// Serializable copy of one rendered frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameRecord {
    pub step: u64,
    pub dimensions: [f32; 2],
    pub background_color: [u8; 3],
    pub boids: Vec<BoidRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoidRecord {
    pub flock: usize,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub color: [u8; 3],
    /// Oldest point first. Omitted when the flock's tracer is disabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trail: Vec<[f32; 2]>,
    pub trail_color: [u8; 3],
}

fn pair(v: Vector2D) -> [f32; 2] {
    [v.x, v.y]
}

impl FrameRecord {
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        Self {
            step: frame.step,
            dimensions: [frame.bounds.width, frame.bounds.height],
            background_color: frame.background_color.channels(),
            boids: frame
                .boids()
                .map(|view| BoidRecord {
                    flock: view.flock,
                    position: pair(view.position),
                    velocity: pair(view.velocity),
                    color: view.color.channels(),
                    trail: view.trail().map(pair).collect(),
                    trail_color: view.trail_color.channels(),
                })
                .collect(),
        }
    }
}
