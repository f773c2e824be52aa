//! Ports layer: Trait definitions at the application boundary.
//!
//! The application only sees [`RiskModel`]; the concrete coefficient set
//! (embedded or loaded from disk) is chosen by the composition root.

mod risk_model;

pub use risk_model::RiskModel;
