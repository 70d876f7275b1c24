//! Feature extraction from request payloads.

use serde_json::Value;

use crate::error::{GradecastError, Result};

/// Named fields read, in order, when a script payload has no `features` key.
pub const NAMED_FEATURE_KEYS: [&str; 3] = ["current_grade", "study_hours", "assignment_score"];

/// Ordered feature values as received. Values are coerced to `f64` only when
/// a row is built for inference, so the count drives model selection even if
/// a value later turns out to be non-numeric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector(Vec<Value>);

impl FeatureVector {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// HTTP extraction: only the `features` key is consulted.
    pub fn from_request(payload: &Value) -> Result<Self> {
        let Some(obj) = payload.as_object() else {
            return Err(GradecastError::InvalidInput(
                "request body must be a JSON object".to_string(),
            ));
        };
        obj.get("features").map_or(Ok(Self::default()), Self::from_features_value)
    }

    /// Script extraction: `features` when present, otherwise the named fields.
    /// A payload that is not an object yields no features.
    pub fn from_script_input(payload: &Value) -> Result<Self> {
        let Some(obj) = payload.as_object() else {
            return Ok(Self::default());
        };

        if let Some(features) = obj.get("features") {
            return Self::from_features_value(features);
        }

        let values = NAMED_FEATURE_KEYS
            .iter()
            .filter_map(|key| obj.get(*key).cloned())
            .collect();
        Ok(Self(values))
    }

    /// An array is taken as-is. Empty-like values (`null`, `false`, `0`, `""`,
    /// `{}`) mean no features; any other scalar or object cannot form a row.
    fn from_features_value(features: &Value) -> Result<Self> {
        match features {
            Value::Array(values) => Ok(Self(values.clone())),
            v if is_empty_like(v) => Ok(Self::default()),
            v => Err(GradecastError::Prediction(format!(
                "features must be an array of numbers, got {v}"
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fail if any value is a string. The HTTP handler takes numbers and
    /// booleans only; numeric strings are a script convenience.
    pub fn require_non_string(&self) -> Result<()> {
        match self.0.iter().position(Value::is_string) {
            Some(i) => Err(GradecastError::Prediction(format!(
                "feature {i} is a string; expected a number"
            ))),
            None => Ok(()),
        }
    }

    /// Coerce every value to `f64`. Numbers, booleans and numeric strings are accepted.
    pub fn to_row(&self) -> Result<Vec<f64>> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, v)| {
                coerce(v).ok_or_else(|| {
                    GradecastError::Prediction(format!(
                        "could not convert feature {i} to float: {v}"
                    ))
                })
            })
            .collect()
    }
}

fn is_empty_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
