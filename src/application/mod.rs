//! Application layer: Use cases.
//!
//! Orchestrates the domain model behind the [`crate::ports::RiskModel`] port.

mod assessment;

pub use assessment::AssessmentService;
