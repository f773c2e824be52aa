//! Ridge logistic regression for ICU acute kidney injury.
//!
//! Fitted on eICU data. Coefficients apply to the raw 0/1 exposure flags and
//! to the already standardized APACHE score, so no scaler is needed.

use serde::{Deserialize, Serialize};

use super::assessment::{
    Contribution, RiskAssessmentInput, RiskAssessmentResult, APACHE_MAX, APACHE_MIN, FEATURE_NAMES,
};

/// Logistic function, `1 / (1 + exp(-x))`.
///
/// Evaluated on the side that keeps `exp` bounded, so large |x| saturates
/// instead of overflowing.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Per-feature coefficients (log-odds per unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coefficients {
    pub ckd_combined: f64,
    pub vol_overload: f64,
    pub dysnatremia: f64,
    pub hyperlactatemia: f64,
    pub hypotension: f64,
    pub nephrotoxin: f64,
    pub apache_std: f64,
}

impl Coefficients {
    /// Coefficients in design-vector order (see [`FEATURE_NAMES`]).
    #[must_use]
    pub fn to_vec(&self) -> [f64; 7] {
        [
            self.ckd_combined,
            self.vol_overload,
            self.dysnatremia,
            self.hyperlactatemia,
            self.hypotension,
            self.nephrotoxin,
            self.apache_std,
        ]
    }
}

/// A fitted ridge logistic regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RidgeModel {
    /// Display name
    #[serde(default = "default_model_name")]
    pub name: String,

    pub intercept: f64,

    pub coefficients: Coefficients,
}

fn default_model_name() -> String {
    "ICU Ridge Model".to_string()
}

impl Default for RidgeModel {
    fn default() -> Self {
        Self::icu_ridge()
    }
}

impl RidgeModel {
    /// The published eICU ridge model.
    #[must_use]
    pub fn icu_ridge() -> Self {
        Self {
            name: default_model_name(),
            intercept: 0.099,
            coefficients: Coefficients {
                ckd_combined: 0.781,
                vol_overload: -0.928,
                dysnatremia: -0.643,
                hyperlactatemia: -0.337,
                hypotension: -1.259,
                nephrotoxin: 0.371,
                apache_std: 0.759,
            },
        }
    }

    /// Check that every parameter is a finite number and that the linear
    /// predictor stays finite for every input inside the slider's bound.
    ///
    /// # Errors
    /// Returns one message per offending parameter, or one for the bound.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.intercept.is_finite() {
            errors.push(format!("intercept {} is not finite", self.intercept));
        }
        for (name, beta) in FEATURE_NAMES.iter().zip(self.coefficients.to_vec()) {
            if !beta.is_finite() {
                errors.push(format!("coefficient {name} = {beta} is not finite"));
            }
        }

        if errors.is_empty() {
            let bound = self.max_abs_linear_predictor();
            if !bound.is_finite() {
                errors.push(format!(
                    "linear predictor overflows within the APACHE range (|lp| bound = {bound})"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// `|intercept| + Σ |beta_i| * max|x_i|`: flags are at most 1, the APACHE
    /// score at most `max(|APACHE_MIN|, |APACHE_MAX|)`.
    fn max_abs_linear_predictor(&self) -> f64 {
        let apache_extent = APACHE_MIN.abs().max(APACHE_MAX.abs());
        let mut extents = [1.0; 7];
        extents[6] = apache_extent;

        self.coefficients
            .to_vec()
            .iter()
            .zip(extents)
            .fold(self.intercept.abs(), |acc, (beta, x)| acc + beta.abs() * x)
    }

    /// `intercept + Σ beta_i * x_i`
    #[must_use]
    pub fn linear_predictor(&self, input: &RiskAssessmentInput) -> f64 {
        self.coefficients
            .to_vec()
            .iter()
            .zip(input.to_vec())
            .fold(self.intercept, |lp, (beta, x)| lp + beta * x)
    }

    #[must_use]
    pub fn predict(&self, input: &RiskAssessmentInput) -> RiskAssessmentResult {
        RiskAssessmentResult::new(sigmoid(self.linear_predictor(input)))
    }

    /// Each feature's `beta * x` term, in design-vector order.
    #[must_use]
    pub fn contributions(&self, input: &RiskAssessmentInput) -> Vec<Contribution> {
        FEATURE_NAMES
            .iter()
            .zip(self.coefficients.to_vec().iter().zip(input.to_vec()))
            .map(|(&feature, (beta, x))| Contribution {
                feature,
                value: beta * x,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{APACHE_MAX, APACHE_MIN};

    const TOL: f64 = 1e-9;

    fn single_flag(index: usize) -> RiskAssessmentInput {
        let mut input = RiskAssessmentInput::default();
        match index {
            0 => input.ckd_combined = true,
            1 => input.vol_overload = true,
            2 => input.dysnatremia = true,
            3 => input.hyperlactatemia = true,
            4 => input.hypotension = true,
            5 => input.nephrotoxin = true,
            _ => unreachable!(),
        }
        input
    }

    /// Every corner of the flag cube at a given APACHE score.
    fn all_flag_combinations(apache_std: f64) -> Vec<RiskAssessmentInput> {
        (0u8..64)
            .map(|bits| RiskAssessmentInput {
                ckd_combined: bits & 1 != 0,
                vol_overload: bits & 2 != 0,
                dysnatremia: bits & 4 != 0,
                hyperlactatemia: bits & 8 != 0,
                hypotension: bits & 16 != 0,
                nephrotoxin: bits & 32 != 0,
                apache_std,
            })
            .collect()
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < TOL);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < TOL);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0).is_finite());
    }

    #[test]
    fn test_baseline_all_false() {
        let model = RidgeModel::default();
        let input = RiskAssessmentInput::default();

        assert!((model.linear_predictor(&input) - 0.099).abs() < TOL);
        let p = model.predict(&input).probability;
        assert!((p - 1.0 / (1.0 + (-0.099f64).exp())).abs() < TOL);
        assert!((p - 0.5247).abs() < 1e-4);
    }

    #[test]
    fn test_all_true() {
        let model = RidgeModel::default();
        let input = RiskAssessmentInput::uniform(true, 0.0);

        assert!((model.linear_predictor(&input) - (-1.916)).abs() < TOL);
        let p = model.predict(&input).probability;
        assert!((p - 1.0 / (1.0 + 1.916f64.exp())).abs() < TOL);
        assert!((p - 0.1283).abs() < 1e-3);
    }

    #[test]
    fn test_apache_monotonic() {
        let model = RidgeModel::default();
        for base in all_flag_combinations(0.0) {
            let mut previous = 0.0;
            for tick in -30..=30 {
                let input = RiskAssessmentInput {
                    apache_std: f64::from(tick) / 10.0,
                    ..base
                };
                let p = model.predict(&input).probability;
                assert!(p > previous, "not increasing at apache_std={}", input.apache_std);
                previous = p;
            }
        }
    }

    #[test]
    fn test_single_flag_direction() {
        let model = RidgeModel::default();
        let baseline = model.predict(&RiskAssessmentInput::default()).probability;

        // ckd, nephrotoxin raise risk
        for index in [0, 5] {
            assert!(model.predict(&single_flag(index)).probability > baseline);
        }
        // volume overload, dysnatremia, hyperlactatemia, hypotension lower it
        for index in [1, 2, 3, 4] {
            assert!(model.predict(&single_flag(index)).probability < baseline);
        }
    }

    #[test]
    fn test_output_strictly_inside_unit_interval() {
        let model = RidgeModel::default();
        for apache in [APACHE_MIN, -1.0, 0.0, 1.0, APACHE_MAX] {
            for input in all_flag_combinations(apache) {
                let p = model.predict(&input).probability;
                assert!(p > 0.0 && p < 1.0, "p={p} for {input:?}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let model = RidgeModel::default();
        let input = RiskAssessmentInput {
            ckd_combined: true,
            hypotension: true,
            apache_std: 1.3,
            ..Default::default()
        };
        let first = model.predict(&input).probability;
        for _ in 0..100 {
            assert_eq!(model.predict(&input).probability.to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_contributions_sum_to_linear_predictor() {
        let model = RidgeModel::default();
        for input in all_flag_combinations(-2.4) {
            let contributions = model.contributions(&input);
            assert_eq!(contributions.len(), 7);
            let sum: f64 = contributions.iter().map(|c| c.value).sum();
            assert!((model.intercept + sum - model.linear_predictor(&input)).abs() < 1e-12);
        }

        let contributions = model.contributions(&single_flag(4));
        assert_eq!(contributions[4].feature, "hypotension");
        assert!((contributions[4].value - (-1.259)).abs() < TOL);
        assert!(contributions[0].value.abs() < TOL);
    }

    #[test]
    fn test_validate() {
        assert!(RidgeModel::default().validate().is_ok());

        let mut invalid = RidgeModel::default();
        invalid.intercept = f64::NAN;
        invalid.coefficients.apache_std = f64::INFINITY;
        let errors = invalid.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].contains("apache_std"));
    }

    #[test]
    fn test_validate_rejects_overflowing_predictor() {
        let mut huge = RidgeModel::default();
        huge.intercept = 1e308;
        huge.coefficients.ckd_combined = 1e308;
        huge.coefficients.apache_std = -1e308;

        // Every parameter is finite, but lp reaches inf/NaN in range.
        let errors = huge.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("overflows"));

        // Large but bounded coefficients still pass and saturate cleanly.
        let mut steep = RidgeModel::default();
        steep.coefficients.apache_std = 1e6;
        assert!(steep.validate().is_ok());
        let p = steep
            .predict(&RiskAssessmentInput::uniform(false, APACHE_MIN))
            .probability;
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_json_roundtrip() {
        let model = RidgeModel::default();
        let json = serde_json::to_string(&model).expect("serialize");
        let parsed: RidgeModel = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, model);
    }
}
