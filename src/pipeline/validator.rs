//! Pipeline configuration validation.
//!
//! Two tiers: `validate_for_save` is the hard gate (the only checks that
//! block persistence), `lint_pipeline` reports advisory issues the builder
//! surfaces but never acts on.

use std::collections::HashSet;

use serde::Serialize;

use super::types::PipelineConfig;
use crate::error::{Error, Result};

/// Issue severity. Errors block a save, warnings never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding from the linter.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// The client-side save gate.
///
/// A configuration is persistable iff its trimmed name is non-empty and it
/// has at least one stage. Nothing else blocks a save.
pub fn validate_for_save(config: &PipelineConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(Error::Validation("Pipeline name is required".into()));
    }
    if config.stages.is_empty() {
        return Err(Error::Validation(
            "Pipeline must have at least one stage".into(),
        ));
    }
    Ok(())
}

/// Advisory checks. None of these block persistence.
pub fn lint_pipeline(config: &PipelineConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for stage in &config.stages {
        if !seen.insert(stage.name.trim().to_lowercase()) {
            issues.push(Issue::warning(format!(
                "Duplicate stage name '{}'",
                stage.name
            )));
        }
    }

    // Transitions are free text intended to name other stages; an entry that
    // matches neither a stage name nor a stage id is probably a typo.
    let known: HashSet<&str> = config
        .stages
        .iter()
        .flat_map(|s| [s.name.as_str(), s.id.as_str()])
        .collect();
    for stage in &config.stages {
        for transition in &stage.transitions {
            if !known.contains(transition.as_str()) {
                issues.push(Issue::warning(format!(
                    "Stage '{}' lists transition to unknown stage '{}'",
                    stage.name, transition
                )));
            }
        }
    }

    // `probability` is clamped at construction but arrives unclamped when the
    // configuration is deserialized from an edited file.
    for stage in &config.stages {
        if stage.probability > 100 {
            issues.push(Issue::warning(format!(
                "Stage '{}' has probability {} (expected 0-100)",
                stage.name, stage.probability
            )));
        }
    }

    if config.branch_specific && config.branch_name.trim().is_empty() {
        issues.push(Issue::warning(
            "Configuration is branch-specific but no branch name is set",
        ));
    }
    if config.role_specific && config.role_name.trim().is_empty() {
        issues.push(Issue::warning(
            "Configuration is role-specific but no role name is set",
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Stage, StageColor};

    fn savable() -> PipelineConfig {
        let mut config = PipelineConfig::new("org-1");
        config.name = "Pipeline".to_string();
        config.add_stage(Stage::new("Lead", StageColor::Blue, 10));
        config
    }

    #[test]
    fn test_gate_rejects_blank_name() {
        let mut config = savable();
        config.name = " \t ".to_string();
        let err = validate_for_save(&config).unwrap_err();
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn test_gate_rejects_zero_stages() {
        let mut config = savable();
        config.stages.clear();
        assert!(validate_for_save(&config).is_err());
    }

    #[test]
    fn test_gate_accepts_minimal_config() {
        assert!(validate_for_save(&savable()).is_ok());
    }

    #[test]
    fn test_lint_flags_duplicate_names() {
        let mut config = savable();
        config.add_stage(Stage::new("lead", StageColor::Red, 50));
        let issues = lint_pipeline(&config);
        assert!(issues.iter().any(|i| i.message.contains("Duplicate")));
        // Warnings never block the save.
        assert!(validate_for_save(&config).is_ok());
    }

    #[test]
    fn test_lint_flags_unknown_transition() {
        let mut config = savable();
        let mut stage = Stage::new("Qualify", StageColor::Teal, 25);
        stage.transitions = vec!["Lead".to_string(), "Nowhere".to_string()];
        config.add_stage(stage);

        let issues = lint_pipeline(&config);
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("Nowhere")));
        assert!(!messages.iter().any(|m| m.contains("'Lead'")));
    }

    #[test]
    fn test_lint_flags_scoping_without_name() {
        let mut config = savable();
        config.branch_specific = true;
        let issues = lint_pipeline(&config);
        assert!(issues.iter().any(|i| i.message.contains("branch")));
    }

    #[test]
    fn test_lint_clean_config_has_no_issues() {
        assert!(lint_pipeline(&savable()).is_empty());
    }
}
