//! Starter pipeline presets.
//!
//! Loading a template is a full overwrite of the stage list (and the name and
//! description for the named presets), never a merge. Scoping fields -
//! organization, branch/role flags, default flag - are left untouched.

use serde::{Deserialize, Serialize};

use super::types::{PipelineConfig, Stage, StageColor};

/// Known starter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Four-stage enterprise qualification flow:
    /// Prospecting -> Engaging -> Advancing -> Decision.
    Peak,
    /// Classic six-stage sales pipeline ending in won/lost.
    Standard,
    /// Empty configuration, built up stage by stage.
    Scratch,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] =
        [TemplateKind::Peak, TemplateKind::Standard, TemplateKind::Scratch];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Peak => "peak",
            TemplateKind::Standard => "standard",
            TemplateKind::Scratch => "scratch",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateKind::Peak => "Four-stage enterprise qualification pipeline",
            TemplateKind::Standard => "Classic six-stage sales pipeline",
            TemplateKind::Scratch => "Start from an empty configuration",
        }
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peak" => Ok(TemplateKind::Peak),
            "standard" => Ok(TemplateKind::Standard),
            "scratch" => Ok(TemplateKind::Scratch),
            _ => Err(format!("Unknown template kind: {}", s)),
        }
    }
}

impl PipelineConfig {
    /// Replace this configuration's stage list with a starter set. Full
    /// overwrite, not a merge. The name is deliberately left alone: a preset
    /// gives you stages, naming the pipeline stays the user's job (and the
    /// save gate still requires it).
    pub fn load_template(&mut self, kind: TemplateKind) {
        self.stages.clear();
        match kind {
            TemplateKind::Peak => {
                for stage in peak_stages() {
                    self.add_stage(stage);
                }
            }
            TemplateKind::Standard => {
                for stage in standard_stages() {
                    self.add_stage(stage);
                }
            }
            TemplateKind::Scratch => {}
        }
    }
}

fn peak_stages() -> Vec<Stage> {
    vec![
        Stage::new("Prospecting", StageColor::Blue, 10)
            .with_requirements(&["Target account identified", "First contact made"]),
        Stage::new("Engaging", StageColor::Teal, 30)
            .with_requirements(&["Discovery call held", "Pain documented"]),
        Stage::new("Advancing", StageColor::Orange, 60)
            .with_requirements(&["Champion identified", "Evaluation plan agreed"]),
        Stage::new("Decision", StageColor::Green, 85)
            .with_requirements(&["Proposal delivered", "Economic buyer engaged"]),
    ]
}

fn standard_stages() -> Vec<Stage> {
    vec![
        Stage::new("Lead In", StageColor::Gray, 5),
        Stage::new("Qualified", StageColor::Blue, 20),
        Stage::new("Proposal Sent", StageColor::Yellow, 45),
        Stage::new("Negotiation", StageColor::Orange, 70),
        Stage::new("Closed Won", StageColor::Green, 100),
        Stage::new("Closed Lost", StageColor::Red, 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_template_replaces_existing_stages() {
        let mut config = PipelineConfig::new("org-1");
        config.name = "Old".to_string();
        config.add_stage(Stage::new("Leftover", StageColor::Red, 50));

        config.load_template(TemplateKind::Peak);

        let names: Vec<&str> = config.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Prospecting", "Engaging", "Advancing", "Decision"]);
        for (i, stage) in config.stages.iter().enumerate() {
            assert_eq!(stage.order, i + 1);
        }
    }

    #[test]
    fn test_scratch_template_resets_to_empty() {
        let mut config = PipelineConfig::new("org-1");
        config.load_template(TemplateKind::Standard);
        assert_eq!(config.stages.len(), 6);

        config.load_template(TemplateKind::Scratch);
        assert!(config.stages.is_empty());
        assert!(!config.can_save());
    }

    #[test]
    fn test_template_preserves_scoping() {
        let mut config = PipelineConfig::new("org-7");
        config.branch_specific = true;
        config.branch_name = "Northeast".to_string();
        config.is_default = true;

        config.load_template(TemplateKind::Peak);

        assert_eq!(config.organization_id, "org-7");
        assert!(config.branch_specific);
        assert_eq!(config.branch_name, "Northeast");
        assert!(config.is_default);
    }

    #[test]
    fn test_save_gate_scenario_from_empty_to_drained() {
        let mut config = PipelineConfig::new("org-1");
        assert!(!config.can_save());

        config.load_template(TemplateKind::Peak);
        assert_eq!(config.stages.len(), 4);
        assert!(!config.can_save(), "preset stages alone are not enough");

        config.name = "Enterprise Pipeline".to_string();
        assert!(config.can_save());

        for _ in 0..4 {
            config.remove_stage(0);
        }
        assert_eq!(config.stages.len(), 0);
        assert!(!config.can_save());
    }

    #[test]
    fn test_kind_parse_round_trip() {
        for kind in TemplateKind::ALL {
            let parsed: TemplateKind = kind.name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("meddpicc".parse::<TemplateKind>().is_err());
    }
}
