//! Adapters layer: Integration with the filesystem and the log sink.
//!
//! - `model_file`: JSON coefficient files (serde_json)
//! - `sanitize`: redaction of patient inputs from log output

pub mod model_file;
pub mod sanitize;

pub use model_file::ModelFileError;
