//! Configuration document and frame records for the flock simulator.

use std::path::Path;

use flock_core::SimulationSettings;

mod document;
mod error;
mod frame;

pub use document::{
    AffinityTable, FlockDocument, SimulationDocument, SimulationSection, TracerSection,
    WindowSection,
};
pub use error::LoadError;
pub use frame::{BoidRecord, FrameRecord};

/// Parses and validates a JSON configuration document.
pub fn from_json_str(text: &str) -> Result<SimulationSettings, LoadError> {
    let document: SimulationDocument = serde_json::from_str(text)?;
    settings_from(document)
}

/// Parses and validates a TOML configuration document.
pub fn from_toml_str(text: &str) -> Result<SimulationSettings, LoadError> {
    let document: SimulationDocument = toml::from_str(text)?;
    settings_from(document)
}

fn settings_from(document: SimulationDocument) -> Result<SimulationSettings, LoadError> {
    log::debug!(
        "Parsed config with {} flock(s), window {}x{}",
        document.flocks.len(),
        document.window.dimensions[0],
        document.window.dimensions[1]
    );
    Ok(document.into_settings()?)
}

/// Reads, parses and validates a configuration file. The format is chosen
/// by extension: `.toml` or `.json`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SimulationSettings, LoadError> {
    let path = path.as_ref();
    let parse: fn(&str) -> Result<SimulationSettings, LoadError> =
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => from_toml_str,
            Some(ext) if ext.eq_ignore_ascii_case("json") => from_json_str,
            _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };

    log::info!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}
