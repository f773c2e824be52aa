//! Assessment input and result types for AKI risk prediction.
//!
//! Inputs are the six pre-AKI exposure flags from the eICU cohort plus the
//! standardized APACHE severity score.

use serde::{Deserialize, Serialize};

/// Lower bound of the standardized APACHE score.
pub const APACHE_MIN: f64 = -3.0;

/// Upper bound of the standardized APACHE score.
pub const APACHE_MAX: f64 = 3.0;

/// Slider step for the standardized APACHE score.
pub const APACHE_STEP: f64 = 0.1;

/// Cohort mean (z = 0).
pub const APACHE_DEFAULT: f64 = 0.0;

/// Clamp a standardized APACHE score into [`APACHE_MIN`, `APACHE_MAX`].
///
/// Non-finite values fall back to [`APACHE_DEFAULT`].
#[must_use]
pub fn clamp_apache(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(APACHE_MIN, APACHE_MAX)
    } else {
        APACHE_DEFAULT
    }
}

/// The seven values read from the form for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentInput {
    /// CKD by eGFR or documented history
    pub ckd_combined: bool,

    /// Volume overload (> +3 L positive balance before AKI)
    pub vol_overload: bool,

    /// Dysnatremia (Na < 135 or > 145 before AKI)
    pub dysnatremia: bool,

    /// Hyperlactatemia (lactate > 2 before AKI)
    pub hyperlactatemia: bool,

    /// Hypotension (MAP < 65 before AKI)
    pub hypotension: bool,

    /// Nephrotoxin exposure before AKI
    pub nephrotoxin: bool,

    /// Standardized APACHE score: (patient - cohort mean) / SD, in [-3, 3]
    pub apache_std: f64,
}

impl Default for RiskAssessmentInput {
    fn default() -> Self {
        Self {
            ckd_combined: false,
            vol_overload: false,
            dysnatremia: false,
            hyperlactatemia: false,
            hypotension: false,
            nephrotoxin: false,
            apache_std: APACHE_DEFAULT,
        }
    }
}

impl RiskAssessmentInput {
    /// Input with every flag set to `flag` and the given APACHE score.
    #[must_use]
    pub fn uniform(flag: bool, apache_std: f64) -> Self {
        Self {
            ckd_combined: flag,
            vol_overload: flag,
            dysnatremia: flag,
            hyperlactatemia: flag,
            hypotension: flag,
            nephrotoxin: flag,
            apache_std: clamp_apache(apache_std),
        }
    }

    /// Copy of this input with `apache_std` forced into its bound.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.apache_std = clamp_apache(self.apache_std);
        self
    }

    /// Design vector in model order: the six flags as 0/1, then `apache_std`.
    #[must_use]
    pub fn to_vec(&self) -> [f64; 7] {
        [
            f64::from(u8::from(self.ckd_combined)),
            f64::from(u8::from(self.vol_overload)),
            f64::from(u8::from(self.dysnatremia)),
            f64::from(u8::from(self.hyperlactatemia)),
            f64::from(u8::from(self.hypotension)),
            f64::from(u8::from(self.nephrotoxin)),
            self.apache_std,
        ]
    }
}

/// Field names in design-vector order.
pub const FEATURE_NAMES: [&str; 7] = [
    "ckd_combined",
    "vol_overload",
    "dysnatremia",
    "hyperlactatemia",
    "hypotension",
    "nephrotoxin",
    "apache_std",
];

/// Short display labels, paired with [`FEATURE_NAMES`] by index.
pub const FEATURE_LABELS: [&str; 7] = [
    "CKD",
    "Volume overload",
    "Dysnatremia",
    "Hyperlactatemia",
    "Hypotension",
    "Nephrotoxin",
    "APACHE (std)",
];

/// Output of the risk evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    /// Predicted probability of AKI, strictly within (0, 1)
    pub probability: f64,
}

impl RiskAssessmentResult {
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    /// Probability as a percentage with two decimals, e.g. `52.47%`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

impl std::fmt::Display for RiskAssessmentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Predicted probability of AKI: {}", self.percentage_label())
    }
}

/// One factor's share of the linear predictor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    /// Field name (see [`FEATURE_NAMES`])
    pub feature: &'static str,

    /// `beta * x`
    pub value: f64,
}

impl Contribution {
    /// Display label for [`Self::feature`]; unknown names are shown as-is.
    #[must_use]
    pub fn label(&self) -> &'static str {
        FEATURE_NAMES
            .iter()
            .position(|&name| name == self.feature)
            .map_or(self.feature, |i| FEATURE_LABELS[i])
    }
}

/// A completed evaluation, kept only long enough to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub input: RiskAssessmentInput,
    pub linear_predictor: f64,
    pub result: RiskAssessmentResult,
    pub contributions: Vec<Contribution>,
}
