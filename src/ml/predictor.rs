//! Shared select-load-predict path used by both the HTTP handler and the
//! `predict` command.

use tracing::debug;

use crate::error::{GradecastError, Result};
use crate::ml::features::FeatureVector;
use crate::ml::selector::{ModelKind, ModelStore};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub value: f64,
    pub features_used: usize,
    pub kind: ModelKind,
}

#[derive(Debug, Clone)]
pub struct Predictor {
    store: ModelStore,
}

impl Predictor {
    pub fn new(store: ModelStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Load the model matching the feature count and run it on a single row.
    ///
    /// The model is resolved before the values are coerced, so a missing
    /// artifact is reported ahead of a non-numeric feature.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        if features.is_empty() {
            return Err(GradecastError::NoFeatures);
        }

        let loaded = self.store.load(features.len())?;
        let row = features.to_row()?;
        let value = loaded
            .model
            .predict(&[row])?
            .into_iter()
            .next()
            .ok_or_else(|| GradecastError::Prediction("model returned no output".to_string()))?;

        debug!(
            kind = %loaded.kind,
            artifact = %loaded.path.display(),
            format = %loaded.format,
            value,
            "prediction complete"
        );

        Ok(Prediction {
            value,
            features_used: features.len(),
            kind: loaded.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::linear::LinearRegression;
    use serde_json::json;

    fn predictor_with_models() -> (tempfile::TempDir, Predictor) {
        let dir = tempfile::tempdir().unwrap();
        LinearRegression::new(vec![2.0], 1.0)
            .save_json(dir.path().join("lin_reg.pkl"))
            .unwrap();
        LinearRegression::new(vec![1.0, 2.0, 3.0], 10.0)
            .save_json(dir.path().join("multi_reg.pkl"))
            .unwrap();
        let predictor = Predictor::new(ModelStore::new(dir.path()));
        (dir, predictor)
    }

    #[test]
    fn single_feature_uses_simple_model() {
        let (_dir, predictor) = predictor_with_models();
        let p = predictor
            .predict(&FeatureVector::new(vec![json!(5)]))
            .unwrap();
        assert_eq!(p.kind, ModelKind::Simple);
        assert!((p.value - 11.0).abs() < 1e-12);
        assert_eq!(p.features_used, 1);
    }

    #[test]
    fn three_features_use_multi_model() {
        let (_dir, predictor) = predictor_with_models();
        let p = predictor
            .predict(&FeatureVector::new(vec![json!(5), json!(3), json!(2)]))
            .unwrap();
        assert_eq!(p.kind, ModelKind::Multi);
        // 10 + 5 + 6 + 6
        assert!((p.value - 27.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_calls_agree() {
        let (_dir, predictor) = predictor_with_models();
        let fv = FeatureVector::new(vec![json!(4.5), json!(1), json!(0)]);
        let a = predictor.predict(&fv).unwrap();
        let b = predictor.predict(&fv).unwrap();
        assert_eq!(a.value, b.value);
    }

    #[test]
    fn empty_features_fail_before_loading() {
        let predictor = Predictor::new(ModelStore::new("/nonexistent"));
        assert!(matches!(
            predictor.predict(&FeatureVector::default()),
            Err(GradecastError::NoFeatures)
        ));
    }

    #[test]
    fn two_features_against_three_feature_model_is_prediction_error() {
        let (_dir, predictor) = predictor_with_models();
        let err = predictor
            .predict(&FeatureVector::new(vec![json!(1), json!(2)]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
