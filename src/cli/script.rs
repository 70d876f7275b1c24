//! stdin/stdout prediction script.
//!
//! Success prints `{"prediction": <float>}` on stdout and nothing else. Every
//! failure prints `{"error": "..."}` on stderr and maps to an exit code:
//!
//! | code | failure                          |
//! |------|----------------------------------|
//! | 2    | environment/config setup         |
//! | 3    | invalid or empty JSON input      |
//! | 4    | no features provided             |
//! | 5    | model could not be loaded        |
//! | 6    | prediction failed                |

use serde_json::{json, Value};
use std::io::{Read, Write};
use tracing::warn;

use crate::error::GradecastError;
use crate::ml::{FeatureVector, Predictor};

pub const EXIT_OK: i32 = 0;
pub const EXIT_ENVIRONMENT: i32 = 2;
pub const EXIT_INVALID_INPUT: i32 = 3;

/// A failed script run: the message for stderr and the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    pub code: i32,
    pub message: String,
}

impl ScriptFailure {
    pub fn invalid_input() -> Self {
        Self {
            code: EXIT_INVALID_INPUT,
            message: "invalid or empty JSON input".to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message })
    }
}

impl From<GradecastError> for ScriptFailure {
    fn from(err: GradecastError) -> Self {
        let code = err.exit_code();
        let message = match &err {
            GradecastError::NoFeatures => "no features provided".to_string(),
            GradecastError::InvalidInput(reason) => format!("invalid input: {reason}"),
            e if e.is_model_load() => format!("failed to load model: {e}"),
            GradecastError::Prediction(reason) => format!("prediction failed: {reason}"),
            e => e.to_string(),
        };
        Self { code, message }
    }
}

/// Run the script logic on an already-parsed payload.
pub fn evaluate_payload(payload: &Value, predictor: &Predictor) -> Result<f64, ScriptFailure> {
    let features = FeatureVector::from_script_input(payload)?;
    let prediction = predictor.predict(&features)?;
    Ok(prediction.value)
}

/// Run the script logic on raw input text.
pub fn evaluate(raw: &str, predictor: &Predictor) -> Result<f64, ScriptFailure> {
    let payload: Value = serde_json::from_str(raw).map_err(|_| ScriptFailure::invalid_input())?;
    evaluate_payload(&payload, predictor)
}

/// Read the whole of `input`, predict, and report on `out`/`err`.
/// Returns the process exit code.
pub fn run<R: Read, W: Write, E: Write>(
    mut input: R,
    out: &mut W,
    err: &mut E,
    predictor: &Predictor,
) -> i32 {
    let mut raw = String::new();
    let result = match input.read_to_string(&mut raw) {
        Ok(_) => evaluate(&raw, predictor),
        Err(_) => Err(ScriptFailure::invalid_input()),
    };

    match result {
        Ok(value) => {
            if let Err(e) = writeln!(out, "{}", json!({ "prediction": value })) {
                warn!("failed to write prediction: {e}");
                return 1;
            }
            EXIT_OK
        }
        Err(failure) => report(err, &failure),
    }
}

/// Write `failure` as JSON to `err` and return its exit code.
pub fn report<E: Write>(err: &mut E, failure: &ScriptFailure) -> i32 {
    let _ = writeln!(err, "{}", failure.to_json());
    failure.code
}
