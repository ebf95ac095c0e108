use anyhow::{Context, Result};
use flock_core::{Simulation, SimulationClock, StopHandle};

use crate::renderer::{RenderControl, Renderer};

/// Drives a simulation: wait for the clock, render the current state, step.
pub struct Runner<R: Renderer> {
    simulation: Simulation,
    clock: SimulationClock,
    renderer: R,
}

impl<R: Renderer> Runner<R> {
    pub fn new(simulation: Simulation, renderer: R) -> Self {
        let clock = SimulationClock::new(simulation.step_length());
        Self {
            simulation,
            clock,
            renderer,
        }
    }

    /// Handle that stops the run loop from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.clock.stop_handle()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Runs until the clock is stopped, the renderer asks to stop, or
    /// `max_steps` steps have completed. Returns the number of steps taken
    /// during this call.
    pub fn run(&mut self, max_steps: Option<u64>) -> Result<u64> {
        let first_step = self.simulation.steps();
        log::info!(
            "Running {} boids in {} flock(s), step length {:?}",
            self.simulation.boids().len(),
            self.simulation.flocks().len(),
            self.clock.step_length()
        );

        while self.clock.tick() {
            let control = self
                .renderer
                .render(&self.simulation.frame())
                .with_context(|| format!("Renderer failed at step {}", self.simulation.steps()))?;
            if control == RenderControl::Stop {
                log::info!("Renderer requested shutdown");
                self.clock.stop();
                break;
            }

            self.simulation.step();

            let taken = self.simulation.steps() - first_step;
            if max_steps.is_some_and(|max| taken >= max) {
                log::info!("Reached step limit of {}", taken);
                break;
            }
        }

        if self.clock.overruns() > 0 {
            log::debug!("{} tick(s) ran longer than the step length", self.clock.overruns());
        }
        Ok(self.simulation.steps() - first_step)
    }

    /// Flushes the renderer and discards the simulation.
    pub fn finish(mut self) -> Result<R> {
        self.renderer.finish()?;
        self.simulation.stop();
        Ok(self.renderer)
    }
}
