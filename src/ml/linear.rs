//! Linear regression inference (CPU-only).
//!
//! Artifacts are produced outside this crate. A model is a coefficient vector,
//! an intercept and an optional z-score standardizer applied to the inputs
//! before the dot product.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{GradecastError, Result};

/// Per-feature z-score normalization fitted alongside the regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    /// One coefficient per input feature.
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<Standardizer>,
    /// Free-form metadata (training date, source dataset, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl LinearRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            coef,
            intercept,
            scaler: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_scaler(mut self, mean: Vec<f64>, scale: Vec<f64>) -> Self {
        self.scaler = Some(Standardizer { mean, scale });
        self
    }

    /// Number of input features the model was fitted on.
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.coef.is_empty() {
            return Err("coef must not be empty".to_string());
        }
        if self.coef.iter().any(|v| !v.is_finite()) {
            return Err("coef contains non-finite values".to_string());
        }
        if !self.intercept.is_finite() {
            return Err("intercept must be finite".to_string());
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != self.coef.len() {
                return Err(format!(
                    "scaler mean length {} != n_features {}",
                    scaler.mean.len(),
                    self.coef.len()
                ));
            }
            if scaler.scale.len() != self.coef.len() {
                return Err(format!(
                    "scaler scale length {} != n_features {}",
                    scaler.scale.len(),
                    self.coef.len()
                ));
            }
            if scaler.scale.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err("scaler scale must be finite and > 0".to_string());
            }
        }
        Ok(())
    }

    /// Predict one value per row of `rows`.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    pub fn predict_one(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features() {
            return Err(GradecastError::Prediction(format!(
                "X has {} features, but LinearRegression is expecting {} features as input",
                row.len(),
                self.n_features()
            )));
        }

        let mut sum = self.intercept;
        for (i, (x, w)) in row.iter().zip(&self.coef).enumerate() {
            let x = match &self.scaler {
                Some(s) => (x - s.mean[i]) / s.scale[i],
                None => *x,
            };
            sum += w * x;
        }

        if !sum.is_finite() {
            return Err(GradecastError::Prediction(
                "prediction is not a finite number".to_string(),
            ));
        }
        Ok(sum)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)
            .map_err(|e| GradecastError::Internal(format!("bincode encode failed: {e}")))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
