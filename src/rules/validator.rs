//! Workflow rule validation.
//!
//! `validate_rule` is the save gate: name plus per-variant payload sanity.
//! An empty action list passes - rules are authored incrementally and an
//! actionless rule is stored like any other. Stage references are checked
//! separately and only ever produce warnings, because rules outlive the
//! stages they mention.

use std::collections::HashSet;

use super::types::{ActionKind, Trigger, WorkflowRule};
use crate::error::{Error, Result};
use crate::pipeline::{Issue, PipelineConfig};

/// Validate a rule before it is sent to the persistence API.
pub fn validate_rule(rule: &WorkflowRule) -> Result<()> {
    if rule.name.trim().is_empty() {
        return Err(Error::Validation("Rule name is required".into()));
    }

    match &rule.trigger {
        Trigger::StageChange { stage } => {
            if stage.trim().is_empty() {
                return Err(Error::Validation(
                    "stage_change trigger requires a stage".into(),
                ));
            }
        }
        Trigger::FieldUpdate { field, .. } => {
            if field.trim().is_empty() {
                return Err(Error::Validation(
                    "field_update trigger requires a field".into(),
                ));
            }
        }
        Trigger::TimeBased { after_days, .. } => {
            if *after_days == 0 {
                return Err(Error::Validation(
                    "time_based trigger requires after_days >= 1".into(),
                ));
            }
        }
        Trigger::Manual => {}
    }

    for (i, action) in rule.actions.iter().enumerate() {
        validate_action(i, &action.kind)?;
    }

    Ok(())
}

fn validate_action(index: usize, kind: &ActionKind) -> Result<()> {
    let fail = |msg: String| Err(Error::Validation(format!("Action {}: {}", index + 1, msg)));

    match kind {
        ActionKind::SendEmail {
            template,
            recipient,
        } => {
            if template.trim().is_empty() {
                return fail("send_email requires a template".into());
            }
            if recipient.trim().is_empty() {
                return fail("send_email requires a recipient".into());
            }
        }
        ActionKind::CreateTask { title, .. } => {
            if title.trim().is_empty() {
                return fail("create_task requires a title".into());
            }
        }
        ActionKind::UpdateField { field, .. } => {
            if field.trim().is_empty() {
                return fail("update_field requires a field".into());
            }
        }
        ActionKind::SendNotification { message, .. } => {
            if message.trim().is_empty() {
                return fail("send_notification requires a message".into());
            }
        }
        ActionKind::CreateActivity {
            activity_type,
            subject,
        } => {
            if activity_type.trim().is_empty() || subject.trim().is_empty() {
                return fail("create_activity requires a type and subject".into());
            }
        }
        ActionKind::AssignUser { user_id } => {
            if user_id.trim().is_empty() {
                return fail("assign_user requires a user id".into());
            }
        }
        ActionKind::Webhook { url, .. } => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return fail(format!("webhook URL must be http(s), got '{}'", url));
            }
        }
    }

    Ok(())
}

/// Report trigger stage references that do not resolve against the given
/// pipeline configuration.
///
/// Advisory only: the reference is soft by design, and what should happen to
/// a rule when its stage is deleted is deliberately left to the consumer of
/// the stored rules. This lint exists so the builder can show the dangling
/// reference instead of silently persisting it.
pub fn check_stage_references(rule: &WorkflowRule, pipeline: &PipelineConfig) -> Vec<Issue> {
    let known: HashSet<&str> = pipeline.stages.iter().map(|s| s.id.as_str()).collect();

    rule.referenced_stage_ids()
        .into_iter()
        .filter(|id| !known.contains(id))
        .map(|id| {
            Issue::warning(format!(
                "Rule '{}' references stage '{}' which is not in pipeline '{}'",
                rule.name, id, pipeline.name
            ))
        })
        .collect()
}
