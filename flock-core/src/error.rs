//! Error types for simulation setup.
//!
//! Every failure the engine can report happens while turning settings into a
//! running [`Simulation`](crate::Simulation). Once a simulation exists, stepping
//! it cannot fail.

use alloc::string::String;
use core::fmt;

/// Errors raised while validating simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric flock parameter is outside its allowed range.
    InvalidField {
        /// Human-readable flock label, e.g. `flock #1 ("prey")`.
        flock: String,
        field: &'static str,
        reason: &'static str,
    },
    /// The step length is negative or not a finite number.
    InvalidStepLength(f32),
    /// The world rectangle has a non-positive or non-finite side.
    InvalidDimensions { width: f32, height: f32 },
    /// The boundary margin is negative or not a finite number.
    InvalidBoundaryMargin(f32),
    /// Two flocks share the same id.
    DuplicateFlockId(String),
    /// An affinity entry names a flock id that does not exist.
    UnknownAffinityTarget { flock: String, target: String },
    /// An affinity value is not a finite number.
    InvalidAffinityValue { flock: String, target: String },
    /// A boid refers to a flock index with no configuration.
    UnknownFlock(usize),
    /// The boid at this index has a NaN or infinite position or velocity.
    NonFiniteBoid(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidField {
                flock,
                field,
                reason,
            } => write!(f, "Invalid `{}` for {}: {}", field, flock, reason),
            ConfigError::InvalidStepLength(value) => write!(
                f,
                "Invalid step length {}: must be a finite, non-negative number of seconds",
                value
            ),
            ConfigError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid window dimensions {}x{}: both sides must be positive",
                width, height
            ),
            ConfigError::InvalidBoundaryMargin(value) => write!(
                f,
                "Invalid boundary margin {}: must be a finite, non-negative distance",
                value
            ),
            ConfigError::DuplicateFlockId(id) => {
                write!(f, "Flock id \"{}\" is used by more than one flock", id)
            }
            ConfigError::UnknownAffinityTarget { flock, target } => write!(
                f,
                "Affinity of {} references unknown flock id \"{}\"",
                flock, target
            ),
            ConfigError::InvalidAffinityValue { flock, target } => write!(
                f,
                "Affinity of {} toward \"{}\" is not a finite number",
                flock, target
            ),
            ConfigError::UnknownFlock(index) => {
                write!(f, "Boid belongs to flock #{}, which is not configured", index)
            }
            ConfigError::NonFiniteBoid(index) => {
                write!(f, "Boid #{} has a non-finite position or velocity", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
