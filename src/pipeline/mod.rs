//! Pipeline configuration model: stages, ordering, presets, validation.

mod ops;
mod templates;
mod types;
mod validator;

pub use templates::TemplateKind;
pub use types::{PipelineConfig, Stage, StageColor};
pub use validator::{lint_pipeline, validate_for_save, Issue, Severity};
