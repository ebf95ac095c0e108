//! Headless driver for the flock simulation engine.

pub mod renderer;
pub mod runner;
pub mod shutdown;

pub use renderer::{JsonRenderer, RenderControl, Renderer, SummaryRenderer};
pub use runner::Runner;
