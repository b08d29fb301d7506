//! REST implementation of [`TaskStore`] over the backend's row API.
//!
//! Every request carries the project API key plus the session's bearer
//! token, so the backend's row-level rules scope reads and writes to
//! the signed-in user.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::auth::Session;
use crate::error::{StoreError, StoreResult};
use crate::models::{Task, TaskDraft, TaskPatch};
use crate::realtime;
use crate::store::{ChangeFeed, TaskStore};
use crate::{StoreConfig, TASKS_TABLE};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Task store backed by the hosted backend's REST and realtime APIs
pub struct SupabaseStore {
    http: reqwest::Client,
    config: StoreConfig,
    access_token: String,
}

impl SupabaseStore {
    /// Create a store bound to an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the HTTP client cannot be built.
    pub fn new(config: StoreConfig, session: &Session) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Config {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            config,
            access_token: session.access_token.clone(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.access_token)
    }

    async fn check(&self, response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Request {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskStore for SupabaseStore {
    async fn list_tasks(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        debug!(user_id, "listing tasks");

        let user_filter = format!("eq.{}", user_id);
        let request = self.http.get(self.endpoint(TASKS_TABLE)).query(&[
            ("select", "*"),
            ("user_id", user_filter.as_str()),
            ("order", "inserted_at.desc"),
        ]);

        let response = self.check(self.authed(request).send().await?).await?;
        let tasks: Vec<Task> = response.json().await?;
        trace!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn insert_task(&self, draft: &TaskDraft) -> StoreResult<()> {
        debug!(title = %draft.title, "inserting task");

        let request = self
            .http
            .post(self.endpoint(TASKS_TABLE))
            .header("Prefer", "return=minimal")
            .json(draft);

        self.check(self.authed(request).send().await?).await?;
        Ok(())
    }

    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> StoreResult<()> {
        if !patch.has_updates() {
            trace!(task_id, "empty patch, skipping update");
            return Ok(());
        }

        debug!(task_id, "updating task");

        let request = self
            .http
            .patch(self.endpoint(TASKS_TABLE))
            .query(&[("id", format!("eq.{}", task_id))])
            .header("Prefer", "return=minimal")
            .json(patch);

        self.check(self.authed(request).send().await?).await?;
        Ok(())
    }

    async fn delete_task(&self, task_id: i64) -> StoreResult<()> {
        debug!(task_id, "deleting task");

        let request = self
            .http
            .delete(self.endpoint(TASKS_TABLE))
            .query(&[("id", format!("eq.{}", task_id))]);

        self.check(self.authed(request).send().await?).await?;
        Ok(())
    }

    async fn subscribe_changes(&self, table: &str) -> StoreResult<ChangeFeed> {
        debug!(table, "subscribing to changes");
        realtime::connect(&self.config, table).await
    }
}
