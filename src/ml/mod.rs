//! Regression inference: artifact decoding, model selection and prediction.
//!
//! Models are loaded from disk on every call; no instance outlives a request.

pub mod artifact;
pub mod features;
pub mod linear;
pub mod predictor;
pub mod selector;

pub use artifact::ArtifactFormat;
pub use features::FeatureVector;
pub use linear::{LinearRegression, Standardizer};
pub use predictor::{Prediction, Predictor};
pub use selector::{LoadedModel, ModelKind, ModelStore};
