//! pipewright - typed pipeline and workflow-rule configuration for CRM deployments
//!
//! pipewright models sales-pipeline configurations (an ordered list of stages
//! with display metadata and win probabilities) and declarative workflow
//! automation rules (a trigger plus an ordered list of actions), keeps the
//! stage-ordering invariant intact through every edit, and talks to the
//! external configuration persistence API that is the source of truth.
//!
//! Rules are authored and stored only; nothing in this crate evaluates or
//! executes them.
//!
//! ## Example
//!
//! ```
//! use pipewright::pipeline::{PipelineConfig, Stage, StageColor, TemplateKind};
//!
//! let mut config = PipelineConfig::new("org-42");
//! config.load_template(TemplateKind::Peak);
//! config.name = "Enterprise Pipeline".to_string();
//!
//! config.add_stage(Stage::new("Closed", StageColor::Green, 100));
//! assert_eq!(config.stages.len(), 5);
//! assert!(config.stages.iter().enumerate().all(|(i, s)| s.order == i + 1));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rules;

pub use error::{Error, Result};
