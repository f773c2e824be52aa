//! Assessment service: Evaluates one set of form inputs.
//!
//! Each call is independent. Nothing is cached or persisted between calls.

use std::sync::Arc;

use crate::domain::{Assessment, RiskAssessmentInput};
use crate::ports::RiskModel;

/// Service running the AKI risk model on form inputs.
pub struct AssessmentService<M>
where
    M: RiskModel,
{
    model: Arc<M>,
}

impl<M> AssessmentService<M>
where
    M: RiskModel,
{
    /// Create a new assessment service.
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Name of the underlying model.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Evaluate `input`.
    ///
    /// `apache_std` is clamped to its slider range first; the evaluation
    /// itself cannot fail.
    #[must_use]
    pub fn assess(&self, input: RiskAssessmentInput) -> Assessment {
        let input = input.clamped();

        let linear_predictor = self.model.linear_predictor(&input);
        let result = self.model.predict(&input);
        let contributions = self.model.contributions(&input);

        tracing::debug!(
            ckd_combined = input.ckd_combined,
            vol_overload = input.vol_overload,
            dysnatremia = input.dysnatremia,
            hyperlactatemia = input.hyperlactatemia,
            hypotension = input.hypotension,
            nephrotoxin = input.nephrotoxin,
            apache_std = input.apache_std,
            linear_predictor,
            probability = result.probability,
            "Assessment evaluated"
        );

        Assessment {
            input,
            linear_predictor,
            result,
            contributions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contribution, RidgeModel, RiskAssessmentResult, APACHE_MAX};

    fn create_test_service() -> AssessmentService<RidgeModel> {
        AssessmentService::new(Arc::new(RidgeModel::default()))
    }

    /// Constant-probability stand-in for the port.
    struct FixedModel;

    impl RiskModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn linear_predictor(&self, _input: &RiskAssessmentInput) -> f64 {
            0.0
        }

        fn predict(&self, _input: &RiskAssessmentInput) -> RiskAssessmentResult {
            RiskAssessmentResult::new(0.5)
        }

        fn contributions(&self, _input: &RiskAssessmentInput) -> Vec<Contribution> {
            Vec::new()
        }
    }

    #[test]
    fn test_assess_baseline() {
        let service = create_test_service();
        let assessment = service.assess(RiskAssessmentInput::default());

        assert!((assessment.linear_predictor - 0.099).abs() < 1e-12);
        assert_eq!(
            assessment.result.to_string(),
            "Predicted probability of AKI: 52.47%"
        );
        assert_eq!(assessment.contributions.len(), 7);
    }

    #[test]
    fn test_assess_matches_model_predict() {
        let service = create_test_service();
        let model = RidgeModel::default();
        let input = RiskAssessmentInput {
            nephrotoxin: true,
            vol_overload: true,
            apache_std: -1.7,
            ..Default::default()
        };

        let assessment = service.assess(input);
        assert_eq!(assessment.result, model.predict(&input));
    }

    #[test]
    fn test_assess_clamps_out_of_range_apache() {
        let service = create_test_service();
        let over = service.assess(RiskAssessmentInput {
            apache_std: 12.0,
            ..Default::default()
        });
        let at_max = service.assess(RiskAssessmentInput {
            apache_std: APACHE_MAX,
            ..Default::default()
        });

        assert!((over.input.apache_std - APACHE_MAX).abs() < f64::EPSILON);
        assert_eq!(over.result, at_max.result);
    }

    #[test]
    fn test_service_uses_port() {
        let service = AssessmentService::new(Arc::new(FixedModel));
        assert_eq!(service.model_name(), "fixed");
        let assessment = service.assess(RiskAssessmentInput::uniform(true, 2.0));
        assert!((assessment.result.probability - 0.5).abs() < f64::EPSILON);
        assert!(assessment.contributions.is_empty());
    }
}
