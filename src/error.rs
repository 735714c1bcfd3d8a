use std::path::PathBuf;

/// Failure of a request. Every variant except [`RequestError::Estimator`] is
/// malformed client input; `Estimator` is a server fault. Use
/// [`RequestError::is_client_error`] to pick the transport status.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("tower ({row}, {col}) is outside the {size}x{size} grid", size = crate::game::GRID_SIZE)]
    TowerOutOfBounds { row: i64, col: i64 },

    #[error("tower ({row}, {col}) overlaps the base")]
    TowerOnBase { row: i64, col: i64 },

    #[error("action index {index} out of range (action count: {count})")]
    ActionOutOfRange { index: i64, count: usize },

    #[error("{field} has length {actual}, expected {expected}")]
    StateLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} contains a non-finite value")]
    NonFinite { field: &'static str },

    /// Internal failure while scoring or training; not the client's fault.
    #[error("estimator error: {0}")]
    Estimator(#[from] EstimatorError),
}

impl RequestError {
    /// Whether the request itself was at fault, as opposed to the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RequestError::Estimator(_))
    }
}

/// Failures inside the value estimator's tensor plumbing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimatorError {
    #[error("failed to read tensor data: {0}")]
    TensorData(String),

    #[error("estimator produced {actual} scores, expected {expected}")]
    OutputSize { expected: usize, actual: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
