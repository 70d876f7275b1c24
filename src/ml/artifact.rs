//! Artifact decoding.
//!
//! Artifacts are JSON documents. Files that do not parse as JSON are retried
//! as bincode, which is what the offline exporter writes for compact builds.

use std::fmt;
use std::path::Path;

use crate::error::{GradecastError, Result};
use crate::ml::linear::LinearRegression;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Bincode => "bincode",
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode raw artifact bytes, trying JSON first and bincode second.
pub fn decode(bytes: &[u8]) -> std::result::Result<(LinearRegression, ArtifactFormat), String> {
    let json_err = match serde_json::from_slice::<LinearRegression>(bytes) {
        Ok(model) => return Ok((model, ArtifactFormat::Json)),
        Err(e) => e,
    };

    match bincode::deserialize::<LinearRegression>(bytes) {
        Ok(model) => Ok((model, ArtifactFormat::Bincode)),
        Err(bin_err) => Err(format!("json: {json_err}; bincode: {bin_err}")),
    }
}

/// Read, decode and validate the artifact at `path`.
pub fn load(path: &Path) -> Result<(LinearRegression, ArtifactFormat)> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => GradecastError::ModelNotFound(path.to_path_buf()),
        _ => GradecastError::ModelDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let (model, format) = decode(&bytes).map_err(|reason| GradecastError::ModelDecode {
        path: path.to_path_buf(),
        reason,
    })?;

    model.validate().map_err(|reason| {
        GradecastError::InvalidModel(format!("{}: {reason}", path.display()))
    })?;

    Ok((model, format))
}
