//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen: the risk factor form on the left, the live prediction on the
//! right. Every input change re-evaluates the model.

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
pub use ui::assessment::AssessmentFormState;
