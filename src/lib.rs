pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;

pub use config::AppConfig;
pub use error::{GradecastError, Result};
pub use ml::{FeatureVector, LinearRegression, ModelKind, ModelStore, Prediction, Predictor};
