use std::fmt;
use std::path::PathBuf;

use flock_core::ConfigError;

/// Errors that can occur while loading a configuration document.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid JSON or is missing a required field.
    Parse(serde_json::Error),
    /// The document is not valid TOML or is missing a required field.
    Toml(toml::de::Error),
    /// The file extension is neither `.toml` nor `.json`.
    UnsupportedFormat(PathBuf),
    /// The document parsed but describes an invalid simulation.
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Failed to read config file {}: {}", path.display(), source)
            }
            LoadError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            LoadError::Toml(e) => write!(f, "Failed to parse config: {}", e),
            LoadError::UnsupportedFormat(path) => write!(
                f,
                "Unsupported config format for {}: expected a .toml or .json file",
                path.display()
            ),
            LoadError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
            LoadError::Toml(e) => Some(e),
            LoadError::UnsupportedFormat(_) => None,
            LoadError::Invalid(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Toml(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}
