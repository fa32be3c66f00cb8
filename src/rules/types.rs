//! Workflow rule type definitions.
//!
//! Triggers and actions are serde-tagged unions with a typed payload per
//! variant, so a rule can never carry leftover condition fields from a
//! trigger type it no longer has, and unknown kinds are rejected at
//! deserialization time instead of being persisted as opaque bags.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What causes a rule to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// A deal moved into the named stage.
    StageChange {
        /// Stage id in the owning organization's pipeline configuration.
        /// A soft reference: deleting the stage later does not touch rules
        /// that mention it, the reference lint just starts reporting it.
        stage: String,
    },
    /// A tracked field changed and the new value matches the condition.
    FieldUpdate {
        field: String,
        operator: FieldOperator,
        #[serde(default)]
        value: serde_json::Value,
    },
    /// A deal sat untouched for a number of days, optionally only while in
    /// one particular stage.
    TimeBased {
        after_days: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stage: Option<String>,
    },
    /// Fired explicitly by a user.
    Manual,
}

impl Trigger {
    /// Wire name of the trigger kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::StageChange { .. } => "stage_change",
            Trigger::FieldUpdate { .. } => "field_update",
            Trigger::TimeBased { .. } => "time_based",
            Trigger::Manual => "manual",
        }
    }
}

/// Comparison operators for field-update conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

/// What a rule does when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    SendEmail {
        template: String,
        recipient: String,
    },
    CreateTask {
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_in_days: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        assignee: Option<String>,
    },
    UpdateField {
        field: String,
        value: serde_json::Value,
    },
    SendNotification {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<String>,
    },
    CreateActivity {
        activity_type: String,
        subject: String,
    },
    AssignUser {
        user_id: String,
    },
    Webhook {
        url: String,
        #[serde(default = "default_webhook_method")]
        method: String,
    },
}

fn default_webhook_method() -> String {
    "POST".to_string()
}

impl ActionKind {
    /// Wire name of the action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionKind::SendEmail { .. } => "send_email",
            ActionKind::CreateTask { .. } => "create_task",
            ActionKind::UpdateField { .. } => "update_field",
            ActionKind::SendNotification { .. } => "send_notification",
            ActionKind::CreateActivity { .. } => "create_activity",
            ActionKind::AssignUser { .. } => "assign_user",
            ActionKind::Webhook { .. } => "webhook",
        }
    }
}

/// One step in a rule's action list.
///
/// Ordering is implicit in list position; there is no order field and removal
/// does not renumber anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,

    /// Minutes to wait before running this action. 0 means immediately.
    #[serde(default)]
    pub delay_minutes: u64,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            delay_minutes: 0,
        }
    }

    pub fn with_delay(mut self, minutes: u64) -> Self {
        self.delay_minutes = minutes;
        self
    }
}

/// A declarative trigger-and-actions automation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRule {
    /// Empty string until first save; assigned by the persistence API.
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub trigger: Trigger,

    /// Ordered action list. May be empty; an empty rule is authored and
    /// persisted like any other.
    #[serde(default)]
    pub actions: Vec<Action>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub branch_specific: bool,
    #[serde(default)]
    pub branch_name: String,

    #[serde(default)]
    pub role_specific: bool,
    #[serde(default)]
    pub role_name: String,

    pub organization_id: String,

    #[serde(default)]
    pub created_by: String,
}

fn default_true() -> bool {
    true
}

impl WorkflowRule {
    /// Create an active rule with no actions yet.
    pub fn new(
        name: impl Into<String>,
        trigger: Trigger,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            trigger,
            actions: Vec::new(),
            is_active: true,
            branch_specific: false,
            branch_name: String::new(),
            role_specific: false,
            role_name: String::new(),
            organization_id: organization_id.into(),
            created_by: String::new(),
        }
    }

    /// Append an action to the end of the list.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Remove the action at `index`. Out-of-range is a no-op. Remaining
    /// actions keep their positions; nothing is renumbered because order is
    /// positional.
    pub fn remove_action(&mut self, index: usize) {
        if index < self.actions.len() {
            self.actions.remove(index);
        }
    }

    /// Stage ids this rule's trigger mentions.
    pub fn referenced_stage_ids(&self) -> Vec<&str> {
        match &self.trigger {
            Trigger::StageChange { stage } => vec![stage.as_str()],
            Trigger::TimeBased {
                stage: Some(stage), ..
            } => vec![stage.as_str()],
            _ => Vec::new(),
        }
    }

    /// Generate a fresh client-side id, used when duplicating a stored rule
    /// into a new draft.
    pub fn with_fresh_id(mut self) -> Self {
        self.id = Uuid::new_v4().to_string();
        self
    }
}
