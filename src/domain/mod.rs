//! Domain layer: Core clinical types and the risk model.
//!
//! Pure Rust types with no I/O. Everything here is deterministic.

mod assessment;
mod model;

pub use assessment::{
    clamp_apache, Assessment, Contribution, RiskAssessmentInput, RiskAssessmentResult,
    APACHE_DEFAULT, APACHE_MAX, APACHE_MIN, APACHE_STEP, FEATURE_NAMES,
};
pub use model::{sigmoid, Coefficients, RidgeModel};
