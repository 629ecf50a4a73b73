//! Configuration loading and management for the Result Engine.
//!
//! This module provides the grading scales and exam-type rules that drive
//! every grade computation, either built in via [`GradingConfig::standard`]
//! or loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use result_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded board: {}", config.config().board().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AbsencePolicy, BoardMetadata, ExamTypeRule, ExamTypesConfig, GradeBand, GradingConfig,
    GradingScale, ScalesConfig,
};
