//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading grading
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{BoardMetadata, ExamTypesConfig, GradingConfig, ScalesConfig};

/// Loads and provides access to grading configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── board.yaml       # Board metadata and absence policy
/// ├── scales.yaml      # Named threshold tables
/// └── exam_types.yaml  # Exam type rules
/// ```
///
/// # Example
///
/// ```no_run
/// use result_engine::config::ConfigLoader;
/// use result_engine::models::ExamType;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// let rule = loader.config().rule(ExamType::AnnualExam).unwrap();
/// println!("Theory pass mark: {}", rule.theory_pass_mark);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: GradingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if any required file is missing
    /// - `ConfigParseError` if any file contains invalid YAML or misses a field
    /// - `InvalidConfig` if the files parse but are inconsistent
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<BoardMetadata>(&path.join("board.yaml"))?;
        let scales = Self::load_yaml::<ScalesConfig>(&path.join("scales.yaml"))?;
        let exam_types = Self::load_yaml::<ExamTypesConfig>(&path.join("exam_types.yaml"))?;

        let config = GradingConfig::new(metadata, scales.scales, exam_types.exam_types)?;

        info!(
            path = %path.display(),
            board = %config.board().code,
            version = %config.board().version,
            scales = config.scales().len(),
            "Loaded grading configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded grading configuration.
    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> GradingConfig {
        self.config
    }
}
