//! Pipeline configuration type definitions.
//!
//! The JSON shape of these types is the wire contract with the configuration
//! persistence API: field names here are field names on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display palette for pipeline stages.
///
/// Purely presentational; no semantic meaning beyond the builder UI swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Teal,
    Gray,
}

impl Default for StageColor {
    fn default() -> Self {
        Self::Blue
    }
}

/// A single pipeline phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Opaque unique identifier, generated client-side at creation time.
    /// Never regenerated by any edit operation.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Display color.
    #[serde(default)]
    pub color: StageColor,

    /// Win probability (percent, 0-100) associated with reaching this stage.
    pub probability: u8,

    /// Inactive stages remain in history but are excluded from active-stage
    /// statistics.
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Free-text entry criteria. Unstructured by design.
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Free-text names of intended next stages. Not enforced against actual
    /// stage ids; the validator reports unknown names as warnings only.
    #[serde(default)]
    pub transitions: Vec<String>,

    /// 1-based position. Contiguous and unique within a configuration; the
    /// ordering engine renumbers on every structural edit.
    pub order: usize,
}

fn default_true() -> bool {
    true
}

impl Stage {
    /// Create a stage with a fresh id. `order` starts at 0 and is assigned
    /// when the stage is added to a configuration.
    pub fn new(name: impl Into<String>, color: StageColor, probability: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color,
            probability: probability.min(100),
            is_active: true,
            requirements: Vec::new(),
            transitions: Vec::new(),
            order: 0,
        }
    }

    /// Builder-style helper for preset definitions.
    pub fn with_requirements(mut self, requirements: &[&str]) -> Self {
        self.requirements = requirements.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// A named, ordered set of stages scoped to an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Empty string until first save; assigned by the persistence API.
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Ordered stage list. `stages[i].order == i + 1` always holds after any
    /// operation in this crate.
    #[serde(default)]
    pub stages: Vec<Stage>,

    /// When true, `branch_name` names the branch this configuration applies
    /// to. Presence of the name is a lint warning, not a save blocker.
    #[serde(default)]
    pub branch_specific: bool,
    #[serde(default)]
    pub branch_name: String,

    #[serde(default)]
    pub role_specific: bool,
    #[serde(default)]
    pub role_name: String,

    /// At most one default configuration per organization is expected, but
    /// uniqueness is the persistence layer's concern, not this crate's.
    #[serde(default)]
    pub is_default: bool,

    pub organization_id: String,

    #[serde(default)]
    pub created_by: String,
}

impl PipelineConfig {
    /// Create an empty, unnamed configuration for an organization.
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            stages: Vec::new(),
            branch_specific: false,
            branch_name: String::new(),
            role_specific: false,
            role_name: String::new(),
            is_default: false,
            organization_id: organization_id.into(),
            created_by: String::new(),
        }
    }

    /// Whether the configuration passes the client-side save gate.
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty() && !self.stages.is_empty()
    }

    /// Number of active stages (inactive stages stay in the list but are
    /// excluded from this statistic).
    pub fn active_stage_count(&self) -> usize {
        self.stages.iter().filter(|s| s.is_active).count()
    }

    /// Look up a stage by id.
    pub fn get_stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }
}
