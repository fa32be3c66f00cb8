//! Workflow automation rule model: triggers, actions, validation.
//!
//! Rules are authored and persisted only. No evaluator exists in this crate;
//! runtime semantics belong to whatever consumes the stored rules.

mod types;
mod validator;

pub use types::{Action, ActionKind, FieldOperator, Trigger, WorkflowRule};
pub use validator::{check_stage_references, validate_rule};
