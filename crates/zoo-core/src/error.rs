//! Error type for configuration and species resolution

/// Errors that can occur while configuring or building a zoo
#[derive(Debug)]
pub enum ZooError {
    /// A species tag that no known species answers to
    UnknownSpecies(String),
    /// A config value outside its usable range
    InvalidConfig(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ZooError {
    fn from(e: std::io::Error) -> Self {
        ZooError::Io(e)
    }
}

impl From<serde_json::Error> for ZooError {
    fn from(e: serde_json::Error) -> Self {
        ZooError::Json(e)
    }
}

impl std::fmt::Display for ZooError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZooError::UnknownSpecies(tag) => write!(f, "Unknown species tag: '{}'", tag),
            ZooError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            ZooError::Io(e) => write!(f, "IO error: {}", e),
            ZooError::Json(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ZooError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ZooError::Io(e) => Some(e),
            ZooError::Json(e) => Some(e),
            _ => None,
        }
    }
}
