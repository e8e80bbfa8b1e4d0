use thiserror::Error;

/// Errors that can occur while extracting and matching ingredients
#[derive(Error, Debug)]
pub enum PathfinderError {
    /// The request is missing the field its mode requires
    #[error("{0}")]
    Validation(String),

    /// The extraction service failed or returned something unusable
    #[error("Ingredient extraction failed: {0}")]
    ExtractionFailed(String),

    /// The extraction endpoint could not be reached at all
    #[error("Could not reach extraction endpoint: {0}")]
    Transport(String),

    /// No usable extraction provider could be built from configuration
    #[error("Provider setup failed: {0}")]
    ProviderSetup(String),

    /// The catalog snapshot violates one of its invariants
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    /// Failed to read a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PathfinderError {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(self, PathfinderError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, PathfinderError>;
