//! Risk model port: Trait for AKI probability models.

use crate::domain::{Contribution, RidgeModel, RiskAssessmentInput, RiskAssessmentResult};

/// A model that maps one assessment input to an AKI probability.
///
/// Implementations must be pure: no I/O, no interior mutability, and the
/// same input always yields the same output.
pub trait RiskModel: Send + Sync {
    /// Human-readable model name for the UI header.
    fn name(&self) -> &str;

    /// Pre-sigmoid log-odds.
    fn linear_predictor(&self, input: &RiskAssessmentInput) -> f64;

    /// Predicted probability, strictly within (0, 1) for finite input.
    fn predict(&self, input: &RiskAssessmentInput) -> RiskAssessmentResult;

    /// Per-feature terms of the linear predictor.
    fn contributions(&self, input: &RiskAssessmentInput) -> Vec<Contribution>;
}

impl RiskModel for RidgeModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn linear_predictor(&self, input: &RiskAssessmentInput) -> f64 {
        RidgeModel::linear_predictor(self, input)
    }

    fn predict(&self, input: &RiskAssessmentInput) -> RiskAssessmentResult {
        RidgeModel::predict(self, input)
    }

    fn contributions(&self, input: &RiskAssessmentInput) -> Vec<Contribution> {
        RidgeModel::contributions(self, input)
    }
}
