use std::io::Write;

use anyhow::{Context, Result};
use flock_core::{Frame, Vector2D};
use flock_shared::FrameRecord;

/// What the run loop should do after a frame has been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderControl {
    Continue,
    /// The renderer is shutting down, e.g. its window was closed.
    Stop,
}

/// Consumer of simulation frames.
///
/// Renderers only ever see a read-only [`Frame`]; they cannot change boid state.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<RenderControl>;

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Logs the size and center of every flock once every `interval` frames.
#[derive(Debug)]
pub struct SummaryRenderer {
    interval: u64,
}

impl SummaryRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Renderer for SummaryRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<RenderControl> {
        if frame.step % self.interval != 0 {
            return Ok(RenderControl::Continue);
        }

        let flocks = frame.flocks();
        let mut totals = vec![(Vector2D::zero(), 0usize); flocks.len()];
        for boid in frame.boids() {
            let (sum, count) = &mut totals[boid.flock];
            *sum += boid.position;
            *count += 1;
        }

        for (index, (sum, count)) in totals.into_iter().enumerate() {
            let label = flocks[index].label(index);
            if count == 0 {
                log::info!("step {}: {} is empty", frame.step, label);
                continue;
            }
            let center = sum / count as f32;
            log::info!(
                "step {}: {} has {} boids centered at ({:.1}, {:.1})",
                frame.step,
                label,
                count,
                center.x,
                center.y
            );
        }

        Ok(RenderControl::Continue)
    }
}

/// Writes one JSON line per rendered frame.
pub struct JsonRenderer<W: Write> {
    writer: W,
    interval: u64,
    written: u64,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval: interval.max(1),
            written: 0,
        }
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<RenderControl> {
        if frame.step % self.interval != 0 {
            return Ok(RenderControl::Continue);
        }

        let record = FrameRecord::from_frame(frame);
        serde_json::to_writer(&mut self.writer, &record).context("Failed to encode frame")?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write frame")?;
        self.written += 1;

        Ok(RenderControl::Continue)
    }

    fn finish(&mut self) -> Result<()> {
        log::debug!("Wrote {} JSON frames", self.written);
        self.writer.flush().context("Failed to flush frames")
    }
}
