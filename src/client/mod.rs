//! Client for the external configuration persistence API.
//!
//! The API is an opaque collaborator: every write submits the full JSON
//! structure and the stored representation comes back with server-assigned
//! ids and timestamps. There is no retry, queuing, or cancellation here -
//! each call is one request, and conflict handling is last-write-wins on the
//! server side.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::pipeline::{validate_for_save, PipelineConfig};
use crate::rules::{validate_rule, WorkflowRule};

/// A stored record as returned by the API: the payload plus the metadata the
/// server stamps onto it.
#[derive(Debug, Clone, Deserialize)]
pub struct Stored<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Configuration API client.
#[derive(Clone)]
pub struct ConfigApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ConfigApi {
    /// Build a client from settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
            token: settings.api.token.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "configuration API request");
        let mut req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    // ---- Pipeline configurations ----

    /// Fetch every pipeline configuration for an organization.
    pub async fn list_pipelines(&self, organization_id: &str) -> Result<Vec<Stored<PipelineConfig>>> {
        let resp = self
            .request(
                reqwest::Method::GET,
                &format!("/api/organizations/{}/pipeline-configs", organization_id),
            )
            .send()
            .await?;
        let body: ListEnvelope<Stored<PipelineConfig>> = check(resp).await?.json().await?;
        Ok(body.items)
    }

    /// Fetch a single pipeline configuration by id.
    pub async fn get_pipeline(&self, id: &str) -> Result<Stored<PipelineConfig>> {
        let resp = self
            .request(reqwest::Method::GET, &format!("/api/pipeline-configs/{}", id))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Pipeline configuration '{}'", id)));
        }
        Ok(check(resp).await?.json().await?)
    }

    /// Persist a pipeline configuration: POST when it has never been saved,
    /// PUT otherwise. The local save gate runs first; on gate failure no
    /// network call is issued.
    pub async fn save_pipeline(&self, config: &PipelineConfig) -> Result<Stored<PipelineConfig>> {
        validate_for_save(config)?;

        let resp = if config.id.is_empty() {
            self.request(reqwest::Method::POST, "/api/pipeline-configs")
                .json(config)
                .send()
                .await?
        } else {
            self.request(
                reqwest::Method::PUT,
                &format!("/api/pipeline-configs/{}", config.id),
            )
            .json(config)
            .send()
            .await?
        };
        Ok(check(resp).await?.json().await?)
    }

    // ---- Workflow rules ----

    /// Fetch every workflow rule for an organization.
    pub async fn list_rules(&self, organization_id: &str) -> Result<Vec<Stored<WorkflowRule>>> {
        let resp = self
            .request(
                reqwest::Method::GET,
                &format!("/api/organizations/{}/workflow-rules", organization_id),
            )
            .send()
            .await?;
        let body: ListEnvelope<Stored<WorkflowRule>> = check(resp).await?.json().await?;
        Ok(body.items)
    }

    /// Fetch a single workflow rule by id.
    pub async fn get_rule(&self, id: &str) -> Result<Stored<WorkflowRule>> {
        let resp = self
            .request(reqwest::Method::GET, &format!("/api/workflow-rules/{}", id))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Workflow rule '{}'", id)));
        }
        Ok(check(resp).await?.json().await?)
    }

    /// Persist a workflow rule, gated by local validation like
    /// [`save_pipeline`](Self::save_pipeline).
    pub async fn save_rule(&self, rule: &WorkflowRule) -> Result<Stored<WorkflowRule>> {
        validate_rule(rule)?;

        let resp = if rule.id.is_empty() {
            self.request(reqwest::Method::POST, "/api/workflow-rules")
                .json(rule)
                .send()
                .await?
        } else {
            self.request(
                reqwest::Method::PUT,
                &format!("/api/workflow-rules/{}", rule.id),
            )
            .json(rule)
            .send()
            .await?
        };
        Ok(check(resp).await?.json().await?)
    }

    /// Delete a workflow rule by id. Pipeline configurations have no delete
    /// surface in this layer.
    pub async fn delete_rule(&self, id: &str) -> Result<()> {
        let resp = self
            .request(reqwest::Method::DELETE, &format!("/api/workflow-rules/{}", id))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Workflow rule '{}'", id)));
        }
        check(resp).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ListEnvelope<T> {
    #[serde(alias = "pipelines", alias = "rules", alias = "data")]
    items: Vec<T>,
}

/// Turn a non-success response into an [`Error::Api`] carrying the message
/// the server sent when one is present in the body.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    error!(status = status.as_u16(), "configuration API error: {}", message);
    Err(Error::Api(message))
}

/// Pull a human-readable message out of an error body. Servers vary: the
/// message may live at `error.message`, `error`, or `message`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(msg) = value.pointer("/error/message").and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    if let Some(msg) = value.get("error").and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    if let Some(msg) = value.get("message").and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    None
}
