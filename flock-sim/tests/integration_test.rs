use anyhow::Result;
use flock_core::{Frame, Simulation, Vector2D};
use flock_shared::FrameRecord;
use flock_sim::{JsonRenderer, RenderControl, Renderer, Runner};
use serde_json::json;

/// Records what it was shown and optionally asks to stop after a number of frames.
#[derive(Default)]
struct RecordingRenderer {
    steps: Vec<u64>,
    boid_counts: Vec<usize>,
    stop_after: Option<usize>,
    finished: bool,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<RenderControl> {
        self.steps.push(frame.step);
        self.boid_counts.push(frame.boids().count());
        match self.stop_after {
            Some(limit) if self.steps.len() >= limit => Ok(RenderControl::Stop),
            _ => Ok(RenderControl::Continue),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

fn config(step_length: f64) -> String {
    json!({
        "simulation": { "step_length": step_length, "seed": 21 },
        "window": { "dimensions": [640, 480], "boundary_margin": 20.0 },
        "flocks": [
            {
                "id": "starlings",
                "count": 25,
                "affinity": { "hawks": -0.03 },
                "alignment": 0.05,
                "separation": 0.8,
                "cohesion": 0.01,
                "min_separation": 10.0,
                "max_speed": 80.0,
                "boundary_force": 6.0,
                "sight_range": 50.0,
                "color": [180, 180, 255],
                "tracer": { "length": 8, "shade": 0.5, "enabled": true }
            },
            {
                "id": "hawks",
                "count": 2,
                "affinity": [["starlings", 0.04]],
                "alignment": 0.0,
                "separation": 0.5,
                "cohesion": 0.0,
                "min_separation": 25.0,
                "max_speed": 100.0,
                "boundary_force": 6.0,
                "sight_range": 150.0,
                "color": [255, 80, 40],
                "tracer": { "length": 20, "shade": 0.2, "enabled": true }
            }
        ]
    })
    .to_string()
}

fn simulation(step_length: f64) -> Simulation {
    let settings = flock_shared::from_json_str(&config(step_length)).unwrap();
    Simulation::start(settings).unwrap()
}

#[test]
fn test_runner_stops_at_step_limit() {
    let mut runner = Runner::new(simulation(0.0), RecordingRenderer::default());

    let taken = runner.run(Some(10)).unwrap();

    assert_eq!(taken, 10);
    assert_eq!(runner.simulation().steps(), 10);
    let renderer = runner.finish().unwrap();
    assert!(renderer.finished);
    // Each frame shows the state before the step that follows it.
    assert_eq!(renderer.steps, (0..10).collect::<Vec<_>>());
    assert!(renderer.boid_counts.iter().all(|&n| n == 27));
}

#[test]
fn test_renderer_can_stop_the_run() {
    let renderer = RecordingRenderer {
        stop_after: Some(4),
        ..RecordingRenderer::default()
    };
    let mut runner = Runner::new(simulation(0.0), renderer);

    let taken = runner.run(None).unwrap();

    assert_eq!(taken, 3);
    assert!(!runner.stop_handle().is_running());
    // A stopped clock does not tick again.
    assert_eq!(runner.run(None).unwrap(), 0);
}

#[test]
fn test_stop_handle_ends_run_before_first_step() {
    let mut runner = Runner::new(simulation(0.0), RecordingRenderer::default());
    runner.stop_handle().stop();

    assert_eq!(runner.run(None).unwrap(), 0);
    let renderer = runner.finish().unwrap();
    assert!(renderer.steps.is_empty());
}

#[test]
fn test_run_respects_step_length() {
    let mut runner = Runner::new(simulation(0.01), RecordingRenderer::default());
    let start = std::time::Instant::now();

    runner.run(Some(5)).unwrap();

    // Five ticks, the first immediate: roughly four full step lengths.
    assert!(start.elapsed() >= std::time::Duration::from_millis(35));
}

#[test]
fn test_json_renderer_writes_frames() {
    let mut runner = Runner::new(simulation(0.0), JsonRenderer::new(Vec::new(), 2));

    runner.run(Some(6)).unwrap();
    let renderer = runner.finish().unwrap();
    assert_eq!(renderer.written(), 3);

    let output = String::from_utf8(renderer.into_inner()).unwrap();
    let frames: Vec<FrameRecord> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(frames.iter().map(|f| f.step).collect::<Vec<_>>(), vec![0, 2, 4]);
    for frame in &frames {
        assert_eq!(frame.dimensions, [640.0, 480.0]);
        assert_eq!(frame.boids.len(), 27);
        for boid in &frame.boids {
            let max_trail = if boid.flock == 0 { 8 } else { 20 };
            assert!(boid.trail.len() <= max_trail);
            assert!(boid.trail.len() as u64 <= frame.step);
        }
    }
}

#[test]
fn test_long_run_keeps_invariants() {
    let mut sim = simulation(0.05);

    for _ in 0..200 {
        sim.step();
        for boid in sim.boids() {
            let config = &sim.flocks()[boid.flock];
            let limit = config.max_speed + 2.0_f32.sqrt() * config.boundary_force;
            assert!(boid.velocity.magnitude() <= limit + 1e-3);
            assert!(boid.trail.len() <= config.tracer.length);
            assert!(boid.position.is_finite());
        }
    }

    let bounds = sim.bounds();
    let center = sim.flock_center(0).unwrap();
    assert!(center.is_finite());
    assert!(center.distance(&Vector2D::new(bounds.width / 2.0, bounds.height / 2.0)) < 1000.0);
}

#[test]
fn test_identical_configs_are_reproducible() {
    let mut a = simulation(0.05);
    let mut b = simulation(0.05);
    for _ in 0..50 {
        a.step();
        b.step();
    }
    for (x, y) in a.boids().iter().zip(b.boids()) {
        assert_eq!(x.position, y.position);
        assert_eq!(x.velocity, y.velocity);
    }
}

#[test]
fn test_toml_demo_runs_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/predator_prey.toml");
    let settings = flock_shared::load_from_path(&path).unwrap();
    let mut sim = Simulation::start(settings).unwrap();
    let predator = sim.flock_by_id("predator").unwrap();

    for _ in 0..20 {
        sim.step();
    }
    assert_eq!(sim.boids().iter().filter(|b| b.flock == predator).count(), 4);
    assert!(sim.boids().iter().all(|b| b.position.is_finite()));
}
