//! Model selection by feature count.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{GradecastError, Result};
use crate::ml::artifact::{self, ArtifactFormat};
use crate::ml::linear::LinearRegression;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Single-feature regression
    Simple,
    /// Regression over two or more features
    Multi,
}

impl ModelKind {
    pub fn for_feature_count(feature_count: usize) -> Result<Self> {
        match feature_count {
            0 => Err(GradecastError::InvalidFeatureCount(0)),
            1 => Ok(Self::Simple),
            _ => Ok(Self::Multi),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Simple => "Simple Regression",
            Self::Multi => "Multiple Regression",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A model freshly read from disk for one request.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub kind: ModelKind,
    pub path: PathBuf,
    pub format: ArtifactFormat,
    pub model: LinearRegression,
}

/// Resolves and loads the two regression artifacts. Nothing is cached.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
    simple_artifact: String,
    multi_artifact: String,
}

impl ModelStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            simple_artifact: "lin_reg.pkl".to_string(),
            multi_artifact: "multi_reg.pkl".to_string(),
        }
    }

    pub fn with_simple_artifact(mut self, name: &str) -> Self {
        self.simple_artifact = name.to_string();
        self
    }

    pub fn with_multi_artifact(mut self, name: &str) -> Self {
        self.multi_artifact = name.to_string();
        self
    }

    /// `public/` next to the running executable, or `./public` when the
    /// executable path is unavailable.
    pub fn default_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("public")))
            .unwrap_or_else(|| PathBuf::from("public"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_name(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::Simple => &self.simple_artifact,
            ModelKind::Multi => &self.multi_artifact,
        }
    }

    pub fn path_for(&self, kind: ModelKind) -> PathBuf {
        self.dir.join(self.artifact_name(kind))
    }

    pub fn is_available(&self, kind: ModelKind) -> bool {
        self.path_for(kind).is_file()
    }

    /// Select the artifact for `feature_count` and load it from disk.
    pub fn load(&self, feature_count: usize) -> Result<LoadedModel> {
        let kind = ModelKind::for_feature_count(feature_count)?;
        let path = self.path_for(kind);
        debug!(path = %path.display(), %kind, "resolving model artifact");

        if !path.exists() {
            return Err(GradecastError::ModelNotFound(path));
        }

        let (model, format) = artifact::load(&path)?;
        let label = format!("{} ({})", kind, self.artifact_name(kind));
        match format {
            ArtifactFormat::Json => {
                info!("Loaded {label} for {feature_count} feature(s)")
            }
            ArtifactFormat::Bincode => {
                info!("Loaded {label} for {feature_count} feature(s) (via {format})")
            }
        }

        Ok(LoadedModel {
            kind,
            path,
            format,
            model,
        })
    }
}
