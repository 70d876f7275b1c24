use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ml::ModelStore;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the artifacts. Unset means `public/` next to the executable.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Single-feature regression artifact
    #[serde(default = "default_simple_artifact")]
    pub simple_artifact: String,
    /// Multi-feature regression artifact
    #[serde(default = "default_multi_artifact")]
    pub multi_artifact: String,
}

fn default_simple_artifact() -> String {
    "lin_reg.pkl".to_string()
}

fn default_multi_artifact() -> String {
    "multi_reg.pkl".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            simple_artifact: default_simple_artifact(),
            multi_artifact: default_multi_artifact(),
        }
    }
}

impl ModelsConfig {
    /// Build the artifact store, letting `dir_override` win over the configured directory.
    pub fn store(&self, dir_override: Option<&Path>) -> ModelStore {
        let dir = dir_override
            .map(Path::to_path_buf)
            .or_else(|| self.dir.clone())
            .unwrap_or_else(ModelStore::default_dir);
        ModelStore::new(dir)
            .with_simple_artifact(&self.simple_artifact)
            .with_multi_artifact(&self.multi_artifact)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Optional directory for daily-rotated server logs
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("models.simple_artifact", default_simple_artifact())?
            .set_default("models.multi_artifact", default_multi_artifact())?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Environment-specific overlay (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("GRADECAST_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // GRADECAST_SERVER__PORT, GRADECAST_MODELS__DIR, ...
            .add_source(
                Environment::with_prefix("GRADECAST")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        let simple = self.models.simple_artifact.trim();
        let multi = self.models.multi_artifact.trim();
        if simple.is_empty() {
            errors.push("models.simple_artifact must not be empty".to_string());
        }
        if multi.is_empty() {
            errors.push("models.multi_artifact must not be empty".to_string());
        }
        if !simple.is_empty() && simple == multi {
            errors.push("models.simple_artifact and models.multi_artifact must differ".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
