//! Reqwest-backed resource client adapter.
//!
//! This adapter owns transport details only: header attachment, one-shot
//! dispatch, status classification, and JSON decoding into domain records.
//! Every call is a single request/response exchange; mutations are never
//! retried here, so at most one network attempt happens per call.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::error::{ApiError, ApiResult};
use crate::domain::record::{MatchResult, ResourceRecord};
use crate::domain::session::SessionStore;

use super::config::ApiConfig;
use super::endpoints::{self, HttpMethod, ListFilter, RequestDescriptor};

/// Authenticated client for the backend's resource families.
///
/// The client reads the session store on every call: when a session is
/// present the request carries `Authorization: Bearer <token>`, otherwise it
/// is sent unauthenticated and the server decides whether that is
/// acceptable (the health probe accepts it; everything else will not).
///
/// List operations deliberately degrade to an empty sequence on any
/// failure, so a transient backend hiccup renders "no items" rather than an
/// error screen; the swallowed failure is logged at `warn`. Detail, create,
/// and action operations surface the full failure taxonomy instead.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use client::domain::SessionStore;
/// use client::outbound::api::{ApiConfig, ResourceClient};
/// use url::Url;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let base: Url = "http://127.0.0.1:8000".parse()?;
/// let config = ApiConfig::new(base, "/api")?;
/// let client = ResourceClient::new(config, Arc::new(SessionStore::new()))?;
/// let reachable = client.health().await;
/// # Ok(())
/// # }
/// ```
pub struct ResourceClient {
    http: reqwest::Client,
    config: ApiConfig,
    sessions: Arc<SessionStore>,
}

impl ResourceClient {
    /// Build a client with a default transport.
    ///
    /// Timeouts are delegated to the transport layer's defaults; hosts that
    /// need explicit limits should pass a pre-built transport to
    /// [`ResourceClient::with_client`].
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] when the transport cannot
    /// be constructed.
    pub fn new(config: ApiConfig, sessions: Arc<SessionStore>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, config, sessions))
    }

    /// Build a client over a caller-configured transport.
    #[must_use]
    pub const fn with_client(
        http: reqwest::Client,
        config: ApiConfig,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            http,
            config,
            sessions,
        }
    }

    /// Execute a descriptor and decode the response body as JSON.
    ///
    /// An empty 200 body decodes to JSON `null`; operations whose contract
    /// declares no payload tolerate that, everything else treats it as a
    /// malformed response at the typed layer.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for non-200 responses, transport
    /// failures, and 200 bodies that are neither empty nor valid JSON.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> ApiResult<Value> {
        let body = self.dispatch(descriptor).await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body)
            .map_err(|error| ApiError::server_error(format!("invalid JSON payload: {error}")))
    }

    /// Send one request and classify the outcome, returning the raw body.
    async fn dispatch(&self, descriptor: &RequestDescriptor) -> ApiResult<Vec<u8>> {
        let url = descriptor
            .url(&self.config)
            .map_err(|error| ApiError::server_error(error.to_string()))?;

        let mut request = self
            .http
            .request(request_method(descriptor.method()), url)
            .header(ACCEPT, "application/json");
        if let Some(body) = descriptor.body() {
            request = request.json(body);
        }
        if let Some(session) = self.sessions.current() {
            request = request.bearer_auth(session.access_token());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status != StatusCode::OK {
            return Err(status_failure(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    /// Execute an operation whose contract declares no response payload.
    async fn acknowledge(&self, descriptor: &RequestDescriptor) -> ApiResult<()> {
        self.dispatch(descriptor).await.map(|_body| ())
    }

    /// Execute a detail operation expecting one JSON object.
    async fn fetch_record(&self, descriptor: &RequestDescriptor) -> ApiResult<ResourceRecord> {
        let value = self.execute(descriptor).await?;
        ResourceRecord::from_value(value)
            .ok_or_else(|| ApiError::server_error("response payload was not a JSON object"))
    }

    /// Execute a create operation and extract the mandatory record id.
    async fn create_record(&self, descriptor: &RequestDescriptor) -> ApiResult<String> {
        let record = self.fetch_record(descriptor).await?;
        record
            .id()
            .map(str::to_owned)
            .ok_or_else(|| ApiError::server_error("created record did not include a string id"))
    }

    /// Execute a list operation with the empty-sequence degradation policy.
    async fn fetch_records(
        &self,
        family: &'static str,
        descriptor: &RequestDescriptor,
    ) -> Vec<ResourceRecord> {
        match self.execute(descriptor).await {
            Ok(Value::Array(items)) => {
                let total = items.len();
                let records: Vec<ResourceRecord> = items
                    .into_iter()
                    .filter_map(ResourceRecord::from_value)
                    .collect();
                if records.len() < total {
                    warn!(
                        family,
                        skipped = total - records.len(),
                        "dropped non-object elements from list payload"
                    );
                }
                records
            }
            Ok(_) => {
                warn!(family, "list payload was not a JSON array; degrading to empty");
                Vec::new()
            }
            Err(error) => {
                warn!(family, %error, "list operation failed; degrading to empty");
                Vec::new()
            }
        }
    }

    // --------- Health ----------

    /// Probe backend reachability.
    ///
    /// True only for a 200 response whose body reports `{"status": "ok"}`.
    pub async fn health(&self) -> bool {
        match self.execute(&endpoints::health()).await {
            Ok(value) => value.get("status").and_then(Value::as_str) == Some("ok"),
            Err(error) => {
                debug!(%error, "health probe failed");
                false
            }
        }
    }

    // --------- Profile ----------

    /// Fetch the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; `me().await.ok()` gives the
    /// optional view for callers that only need presence.
    pub async fn me(&self) -> ApiResult<ResourceRecord> {
        self.fetch_record(&endpoints::profile()).await
    }

    /// Apply a partial update to the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; `is_ok()` gives the boolean view.
    pub async fn update_profile(&self, body: Value) -> ApiResult<()> {
        self.acknowledge(&endpoints::update_profile(body)).await
    }

    // --------- Help requests ----------

    /// List help requests; failures degrade to an empty sequence.
    pub async fn list_help_requests(&self, filter: &ListFilter) -> Vec<ResourceRecord> {
        self.fetch_records("help-requests", &endpoints::help_requests(filter))
            .await
    }

    /// Fetch one help request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with kind `NotFound` for unknown identifiers.
    pub async fn get_help_request(&self, id: &str) -> ApiResult<ResourceRecord> {
        self.fetch_record(&endpoints::help_request(id)).await
    }

    /// Create a help request and return the server-minted id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`], including `ServerError` when a
    /// 200 response lacks a string `id`.
    pub async fn create_help_request(&self, body: Value) -> ApiResult<String> {
        self.create_record(&endpoints::create_help_request(body)).await
    }

    /// Fetch the server-ranked helper matches for a help request.
    ///
    /// Order is preserved exactly as the server returned it; malformed
    /// elements are skipped, and failures degrade to an empty sequence.
    pub async fn match_helpers(&self, help_request_id: &str) -> Vec<MatchResult> {
        match self
            .execute(&endpoints::helper_matches(help_request_id))
            .await
        {
            Ok(Value::Array(items)) => {
                let total = items.len();
                let results: Vec<MatchResult> =
                    items.iter().filter_map(MatchResult::from_value).collect();
                if results.len() < total {
                    warn!(
                        family = "match",
                        skipped = total - results.len(),
                        "dropped malformed match elements"
                    );
                }
                results
            }
            Ok(_) => {
                warn!(family = "match", "match payload was not a JSON array; degrading to empty");
                Vec::new()
            }
            Err(error) => {
                warn!(family = "match", %error, "match lookup failed; degrading to empty");
                Vec::new()
            }
        }
    }

    // --------- Content ----------

    /// List content items; failures degrade to an empty sequence.
    pub async fn list_content(&self, filter: &ListFilter) -> Vec<ResourceRecord> {
        self.fetch_records("content", &endpoints::content_items(filter))
            .await
    }

    /// Publish a content item and return the server-minted id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn create_content(&self, body: Value) -> ApiResult<String> {
        self.create_record(&endpoints::create_content(body)).await
    }

    // --------- Q&A ----------

    /// List questions; failures degrade to an empty sequence.
    pub async fn list_questions(&self, filter: &ListFilter) -> Vec<ResourceRecord> {
        self.fetch_records("questions", &endpoints::questions(filter))
            .await
    }

    /// Post a question and return the server-minted id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn create_question(&self, body: Value) -> ApiResult<String> {
        self.create_record(&endpoints::create_question(body)).await
    }

    /// List the answers under one question; failures degrade to empty.
    pub async fn list_answers(&self, question_id: &str) -> Vec<ResourceRecord> {
        self.fetch_records("answers", &endpoints::question_answers(question_id))
            .await
    }

    /// Post an answer and return the server-minted id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn create_answer(&self, body: Value) -> ApiResult<String> {
        self.create_record(&endpoints::create_answer(body)).await
    }

    // --------- Projects ----------

    /// List projects; failures degrade to an empty sequence.
    pub async fn list_projects(&self) -> Vec<ResourceRecord> {
        self.fetch_records("projects", &endpoints::projects()).await
    }

    /// Create a project and return the server-minted id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn create_project(&self, body: Value) -> ApiResult<String> {
        self.create_record(&endpoints::create_project(body)).await
    }

    /// Apply to join a project.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; `is_ok()` gives the boolean view.
    pub async fn apply_to_project(
        &self,
        project_id: &str,
        message: Option<&str>,
    ) -> ApiResult<()> {
        self.acknowledge(&endpoints::apply_to_project(project_id, message))
            .await
    }

    // --------- Events ----------

    /// List events; failures degrade to an empty sequence.
    pub async fn list_events(&self) -> Vec<ResourceRecord> {
        self.fetch_records("events", &endpoints::events()).await
    }

    /// Create an event and return the server-minted id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn create_event(&self, body: Value) -> ApiResult<String> {
        self.create_record(&endpoints::create_event(body)).await
    }

    /// Enrol in an event.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; `is_ok()` gives the boolean view.
    pub async fn enroll_in_event(&self, event_id: &str) -> ApiResult<()> {
        self.acknowledge(&endpoints::enroll_in_event(event_id)).await
    }

    // --------- Notifications ----------

    /// List the caller's notifications; failures degrade to empty.
    pub async fn list_notifications(&self) -> Vec<ResourceRecord> {
        self.fetch_records("notifications", &endpoints::notifications())
            .await
    }
}

const fn request_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::server_error(format!("transport timeout: {error}"))
    } else {
        ApiError::server_error(format!("transport failure: {error}"))
    }
}

fn status_failure(status: StatusCode, body: &[u8]) -> ApiError {
    let preview = body_preview(body);
    let detail = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    ApiError::from_status(status.as_u16(), detail)
}

/// Bounded, whitespace-collapsed excerpt of a failure body.
///
/// Failure bodies are not required to be JSON, or UTF-8, or small; the
/// excerpt keeps diagnostics readable without ever failing itself.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() <= PREVIEW_CHAR_LIMIT {
        return compact;
    }
    let truncated: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    format!("{truncated}...")
}
