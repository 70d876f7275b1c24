use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum GradecastError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No features provided")]
    NoFeatures,

    #[error("Invalid feature count: {0}")]
    InvalidFeatureCount(usize),

    // Model errors
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Failed to decode model {}: {reason}", .path.display())]
    ModelDecode { path: PathBuf, reason: String },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    // Inference errors
    #[error("{0}")]
    Prediction(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GradecastError {
    /// Process exit code used by the `predict` command for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_model_load() {
            return 5;
        }
        match self {
            Self::Config(_) | Self::InvalidConfig(_) => 2,
            Self::InvalidInput(_) | Self::Json(_) => 3,
            Self::NoFeatures => 4,
            Self::Prediction(_) => 6,
            _ => 1,
        }
    }

    /// True for failures that happen while resolving or decoding an artifact.
    pub fn is_model_load(&self) -> bool {
        matches!(
            self,
            Self::InvalidFeatureCount(_)
                | Self::ModelNotFound(_)
                | Self::ModelDecode { .. }
                | Self::InvalidModel(_)
        )
    }
}

/// Result type alias for GradecastError
pub type Result<T> = std::result::Result<T, GradecastError>;
