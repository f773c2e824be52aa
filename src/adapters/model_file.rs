//! JSON coefficient files for the ridge model.
//!
//! The published coefficients are compiled in. An alternative set (e.g. after
//! retraining) can be supplied through `AKI_RISK_MODEL_PATH`, pointing either
//! at a JSON file or at a directory containing `aki_model.json`:
//!
//! ```json
//! {
//!   "name": "ICU Ridge Model",
//!   "intercept": 0.099,
//!   "coefficients": {
//!     "ckd_combined": 0.781, "vol_overload": -0.928, "dysnatremia": -0.643,
//!     "hyperlactatemia": -0.337, "hypotension": -1.259, "nephrotoxin": 0.371,
//!     "apache_std": 0.759
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::domain::RidgeModel;

/// Environment variable naming the model file or directory.
pub const MODEL_PATH_ENV: &str = "AKI_RISK_MODEL_PATH";

/// File looked up when the model path is a directory.
pub const MODEL_FILE_NAME: &str = "aki_model.json";

/// Errors raised while loading a model file.
#[derive(Debug, thiserror::Error)]
pub enum ModelFileError {
    #[error("Model file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model parameters: {0}")]
    Invalid(String),
}

/// Resolve a user-supplied path to the JSON file to read.
fn resolve_model_file(path: &Path) -> Result<PathBuf, ModelFileError> {
    let candidate = if path.is_dir() {
        path.join(MODEL_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(ModelFileError::NotFound(candidate))
    }
}

/// Load and validate a ridge model from a JSON file or directory.
///
/// # Errors
/// Returns error if the file is missing, unreadable, malformed, or carries
/// non-finite parameters.
pub fn load_model(path: &Path) -> Result<RidgeModel, ModelFileError> {
    let model_path = resolve_model_file(path)?;

    let content = std::fs::read_to_string(&model_path).map_err(|source| ModelFileError::Io {
        path: model_path.clone(),
        source,
    })?;
    let model: RidgeModel =
        serde_json::from_str(&content).map_err(|source| ModelFileError::Parse {
            path: model_path.clone(),
            source,
        })?;

    model
        .validate()
        .map_err(|errors| ModelFileError::Invalid(errors.join(", ")))?;

    tracing::info!(
        "Loaded model {:?} from {:?} (intercept={})",
        model.name,
        model_path,
        model.intercept
    );

    Ok(model)
}

/// Load from `path` when given, otherwise return the embedded model.
///
/// # Errors
/// See [`load_model`].
pub fn load_model_or_default(path: Option<&Path>) -> Result<RidgeModel, ModelFileError> {
    match path {
        Some(path) => load_model(path),
        None => {
            tracing::info!("Using embedded ICU ridge model");
            Ok(RidgeModel::icu_ridge())
        }
    }
}

/// Load the model selected by `AKI_RISK_MODEL_PATH`, or the embedded one.
///
/// An empty value counts as unset.
///
/// # Errors
/// See [`load_model`].
pub fn load_model_from_env() -> Result<RidgeModel, ModelFileError> {
    let configured = std::env::var_os(MODEL_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    load_model_or_default(configured.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RETRAINED: &str = r#"{
        "name": "Retrained",
        "intercept": -0.2,
        "coefficients": {
            "ckd_combined": 0.8,
            "vol_overload": -0.9,
            "dysnatremia": -0.6,
            "hyperlactatemia": -0.3,
            "hypotension": -1.2,
            "nephrotoxin": 0.4,
            "apache_std": 0.7
        }
    }"#;

    #[test]
    fn test_load_model_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("custom.json");
        std::fs::write(&path, RETRAINED).expect("write model");

        let model = load_model(&path).expect("Model should load");
        assert_eq!(model.name, "Retrained");
        assert!((model.intercept - (-0.2)).abs() < f64::EPSILON);
        assert!((model.coefficients.apache_std - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_model_from_directory() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join(MODEL_FILE_NAME), RETRAINED).expect("write model");

        let model = load_model(dir.path()).expect("Model should load");
        assert_eq!(model.name, "Retrained");
    }

    #[test]
    fn test_name_defaults_when_omitted() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(MODEL_FILE_NAME);
        let json = serde_json::to_string(&serde_json::json!({
            "intercept": 0.099,
            "coefficients": RidgeModel::icu_ridge().coefficients,
        }))
        .expect("serialize");
        std::fs::write(&path, json).expect("write model");

        let model = load_model(&path).expect("Model should load");
        assert_eq!(model, RidgeModel::icu_ridge());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().expect("tempdir");
        let err = load_model(dir.path()).unwrap_err();
        assert!(matches!(err, ModelFileError::NotFound(_)));
    }

    #[test]
    fn test_missing_coefficient_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(MODEL_FILE_NAME);
        std::fs::write(
            &path,
            r#"{"intercept": 0.1, "coefficients": {"ckd_combined": 0.7}}"#,
        )
        .expect("write model");

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ModelFileError::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(MODEL_FILE_NAME);
        let mut value: serde_json::Value = serde_json::from_str(RETRAINED).expect("parse");
        value["coefficients"]["lactate_mmol"] = serde_json::json!(0.1);
        std::fs::write(&path, value.to_string()).expect("write model");

        assert!(matches!(
            load_model(&path).unwrap_err(),
            ModelFileError::Parse { .. }
        ));
    }

    #[test]
    fn test_overflowing_coefficients_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(MODEL_FILE_NAME);
        std::fs::write(
            &path,
            r#"{
                "intercept": 1e308,
                "coefficients": {
                    "ckd_combined": 1e308,
                    "vol_overload": 0.0,
                    "dysnatremia": 0.0,
                    "hyperlactatemia": 0.0,
                    "hypotension": 0.0,
                    "nephrotoxin": 0.0,
                    "apache_std": -1e308
                }
            }"#,
        )
        .expect("write model");

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ModelFileError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn test_shipped_model_matches_embedded() {
        let shipped = load_model(Path::new("models")).expect("Shipped model should load");
        let embedded = RidgeModel::icu_ridge();

        assert_eq!(shipped.name, embedded.name);
        assert!((shipped.intercept - embedded.intercept).abs() < 1e-12);
        for (a, b) in shipped
            .coefficients
            .to_vec()
            .iter()
            .zip(embedded.coefficients.to_vec())
        {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_default_when_unconfigured() {
        let model = load_model_or_default(None).expect("embedded model");
        assert_eq!(model, RidgeModel::icu_ridge());
    }
}
