//! # AKI Risk
//!
//! Bedside estimate of acute kidney injury risk for ICU patients.
//!
//! This crate provides:
//! - A ridge logistic regression over six pre-AKI exposures and the
//!   standardized APACHE score
//! - Optional JSON coefficient files for retrained models
//! - Terminal UI with live re-evaluation on every input change
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (assessment input/result, ridge model)
//! - `ports`: Trait definitions at the application boundary
//! - `adapters`: Model files (serde_json) and log redaction
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{RidgeModel, RiskAssessmentInput, RiskAssessmentResult};

/// Result type for AKI Risk operations
pub type Result<T> = std::result::Result<T, AkiRiskError>;

/// Main error type for AKI Risk
#[derive(Debug, thiserror::Error)]
pub enum AkiRiskError {
    #[error("Model file error: {0}")]
    ModelFile(#[from] adapters::ModelFileError),
}

/// Load the configured model (see `AKI_RISK_MODEL_PATH`).
///
/// # Errors
/// Returns error if a configured model file is missing or invalid.
pub fn configured_model() -> Result<RidgeModel> {
    Ok(adapters::model_file::load_model_from_env()?)
}
