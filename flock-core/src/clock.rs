//! Wall-clock pacing for the simulation loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable handle that stops a [`SimulationClock`] from another thread,
/// e.g. a signal handler or a window-close callback.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Keeps successive ticks at least `step_length` apart.
///
/// Ticks that arrive late are not made up for: there is no catch-up and no
/// sub-stepping, the next tick simply starts as soon as it is asked for.
#[derive(Debug)]
pub struct SimulationClock {
    step_length: Duration,
    last_tick: Option<Instant>,
    running: StopHandle,
    overruns: u64,
}

impl SimulationClock {
    /// `step_length` is in seconds. Negative or non-finite values are
    /// treated as zero, i.e. no pacing.
    pub fn new(step_length: f32) -> Self {
        let step_length = if step_length.is_finite() && step_length > 0.0 {
            Duration::from_secs_f32(step_length)
        } else {
            Duration::ZERO
        };
        Self {
            step_length,
            last_tick: None,
            running: StopHandle(Arc::new(AtomicBool::new(true))),
            overruns: 0,
        }
    }

    pub fn step_length(&self) -> Duration {
        self.step_length
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }

    pub fn stop(&mut self) {
        self.running.stop();
    }

    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Number of ticks whose previous interval already exceeded `step_length`.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Blocks until at least `step_length` has passed since the previous
    /// tick, then starts a new one. Returns `false` once the clock is stopped.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < self.step_length {
                std::thread::sleep(self.step_length - elapsed);
            } else if !self.step_length.is_zero() && elapsed > self.step_length {
                self.overruns += 1;
                log::debug!(
                    "Tick overran by {:?} (step length {:?})",
                    elapsed - self.step_length,
                    self.step_length
                );
            }
        }

        self.last_tick = Some(Instant::now());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_are_paced() {
        let mut clock = SimulationClock::new(0.02);
        let start = Instant::now();
        for _ in 0..4 {
            assert!(clock.tick());
        }
        // The first tick is immediate; the three after it wait a full step each.
        assert!(start.elapsed() >= Duration::from_millis(55));
    }

    #[test]
    fn test_zero_step_length_does_not_sleep() {
        let mut clock = SimulationClock::new(0.0);
        assert_eq!(clock.step_length(), Duration::ZERO);
        for _ in 0..1000 {
            assert!(clock.tick());
        }
        assert_eq!(clock.overruns(), 0);
    }

    #[test]
    fn test_slow_tick_counts_as_overrun() {
        let mut clock = SimulationClock::new(0.001);
        clock.tick();
        std::thread::sleep(Duration::from_millis(10));
        clock.tick();
        assert_eq!(clock.overruns(), 1);
    }

    #[test]
    fn test_stop_handle_stops_clock() {
        let mut clock = SimulationClock::new(0.0);
        let handle = clock.stop_handle();
        assert!(clock.tick());

        std::thread::spawn(move || handle.stop()).join().unwrap();

        assert!(!clock.is_running());
        assert!(!clock.tick());
    }

    #[test]
    fn test_negative_step_length_disables_pacing() {
        let clock = SimulationClock::new(-1.0);
        assert_eq!(clock.step_length(), Duration::ZERO);
        assert!(clock.is_running());
    }
}
