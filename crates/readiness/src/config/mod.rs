use crate::assessment::{Catalogue, CatalogueError};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub assessment: AssessmentConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let catalogue_path = optional_path("READINESS_CATALOGUE")?;
        let export_dir =
            optional_path("READINESS_EXPORT_DIR")?.unwrap_or_else(|| PathBuf::from("."));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            assessment: AssessmentConfig {
                catalogue_path,
                export_dir,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn optional_path(var: &'static str) -> Result<Option<PathBuf>, ConfigError> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::BlankPath { var }),
        Ok(value) => Ok(Some(PathBuf::from(value.trim()))),
        Err(_) => Ok(None),
    }
}

/// Where the catalogue comes from and where exports are written.
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    pub catalogue_path: Option<PathBuf>,
    pub export_dir: PathBuf,
}

impl AssessmentConfig {
    /// Loads the configured catalogue definition, or the built-in BCBS-239 catalogue.
    pub fn catalogue(&self) -> Result<Catalogue, CatalogueError> {
        match &self.catalogue_path {
            Some(path) => Catalogue::from_path(path),
            None => Catalogue::bcbs239(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    BlankPath { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BlankPath { var } => {
                write!(f, "{var} must be a non-empty path when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
