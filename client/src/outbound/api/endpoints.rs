//! Pure endpoint resolution for every backend operation.
//!
//! Each resolver function maps one (resource family, operation, parameters)
//! triple to an immutable [`RequestDescriptor`]. No I/O happens here; the
//! resource client renders descriptors into URLs and dispatches them.
//!
//! Path parameters are substituted verbatim (an empty identifier is a
//! caller programming error, not a runtime failure) and receive standard
//! URL-component encoding only when the descriptor is rendered. Optional
//! query parameters appear only when the caller supplied a non-empty value;
//! the server never sees a literal empty or null query entry.

use serde_json::{Map, Value, json};
use thiserror::Error;
use url::Url;

use super::config::ApiConfig;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Idempotent read.
    Get,
    /// Create or family-specific action.
    Post,
    /// Full or partial update.
    Put,
}

impl HttpMethod {
    /// Canonical method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Optional text and tag filters accepted by searchable list operations.
///
/// # Examples
/// ```
/// use client::outbound::api::ListFilter;
///
/// let filter = ListFilter::new().with_tag("mentoring");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    query: Option<String>,
    tag: Option<String>,
}

impl ListFilter {
    /// Filter matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to a free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Restrict results to one tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    fn append_to(&self, pairs: &mut Vec<(&'static str, String)>) {
        push_present(pairs, "q", self.query.as_deref());
        push_present(pairs, "tag", self.tag.as_deref());
    }
}

/// Append an optional pair only when the value is non-empty once trimmed.
fn push_present(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(raw) = value {
        if !raw.trim().is_empty() {
            pairs.push((key, raw.to_owned()));
        }
    }
}

/// Errors raised while rendering a descriptor into a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The configured base URL cannot carry path segments.
    #[error("base URL cannot carry request paths: {url}")]
    UnsupportedBaseUrl {
        /// The offending URL, rendered for diagnostics.
        url: String,
    },
}

/// The resolved, transport-ready shape of one API call.
///
/// ## Invariants
/// - Immutable once constructed; every call builds a fresh descriptor.
/// - `query` never contains empty or placeholder values.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl RequestDescriptor {
    fn new(method: HttpMethod, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|segment| (*segment).to_owned()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Method the request will be dispatched with.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Operation path relative to the API prefix, without query parameters.
    ///
    /// # Examples
    /// ```
    /// use client::outbound::api::endpoints;
    ///
    /// assert_eq!(endpoints::helper_matches("abc123").path(), "/match/abc123");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    /// Query pairs in emission order.
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        self.query.as_slice()
    }

    /// JSON body, when the operation carries one.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Render the fully-qualified request URL against a configuration.
    ///
    /// Path segments and query pairs receive standard URL-component
    /// encoding here and nowhere else.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::UnsupportedBaseUrl`] when the configured
    /// base URL cannot carry path segments.
    pub fn url(&self, config: &ApiConfig) -> Result<Url, EndpointError> {
        let mut url = config.base_url().clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|()| EndpointError::UnsupportedBaseUrl {
                        url: config.base_url().to_string(),
                    })?;
            segments.pop_if_empty();
            segments.extend(config.prefix_segments().iter().map(String::as_str));
            segments.extend(self.segments.iter().map(String::as_str));
        }
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

// --------- Profile ----------

/// Fetch the caller's profile singleton.
#[must_use]
pub fn profile() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["profiles", "me"])
}

/// Apply a partial update to the caller's profile.
#[must_use]
pub fn update_profile(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Put, &["profiles", "me"]).with_body(body)
}

// --------- Help requests ----------

/// List help requests, optionally filtered.
#[must_use]
pub fn help_requests(filter: &ListFilter) -> RequestDescriptor {
    let mut query = Vec::new();
    filter.append_to(&mut query);
    RequestDescriptor::new(HttpMethod::Get, &["rfh"]).with_query(query)
}

/// Fetch one help request by identifier.
#[must_use]
pub fn help_request(id: &str) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["rfh", id])
}

/// Create a help request from a caller-shaped body.
#[must_use]
pub fn create_help_request(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["rfh"]).with_body(body)
}

/// Fetch the server-ranked helper matches for a help request.
#[must_use]
pub fn helper_matches(help_request_id: &str) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["match", help_request_id])
}

// --------- Content ----------

/// List content items, optionally filtered.
#[must_use]
pub fn content_items(filter: &ListFilter) -> RequestDescriptor {
    let mut query = Vec::new();
    filter.append_to(&mut query);
    RequestDescriptor::new(HttpMethod::Get, &["content"]).with_query(query)
}

/// Publish a content item.
#[must_use]
pub fn create_content(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["content"]).with_body(body)
}

// --------- Q&A ----------

/// List questions, optionally filtered.
#[must_use]
pub fn questions(filter: &ListFilter) -> RequestDescriptor {
    let mut query = Vec::new();
    filter.append_to(&mut query);
    RequestDescriptor::new(HttpMethod::Get, &["qa", "questions"]).with_query(query)
}

/// Post a question.
#[must_use]
pub fn create_question(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["qa", "questions"]).with_body(body)
}

/// List the answers under one question.
#[must_use]
pub fn question_answers(question_id: &str) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["qa", "questions", question_id, "answers"])
}

/// Post an answer.
#[must_use]
pub fn create_answer(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["qa", "answers"]).with_body(body)
}

// --------- Projects ----------

/// List projects.
#[must_use]
pub fn projects() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["projects"])
}

/// Create a project.
#[must_use]
pub fn create_project(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["projects"]).with_body(body)
}

/// Apply to join a project.
///
/// The body always carries the `message` key; an absent message is sent as
/// JSON `null` (query-parameter omission does not apply to bodies).
#[must_use]
pub fn apply_to_project(project_id: &str, message: Option<&str>) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["projects", project_id, "apply"])
        .with_body(json!({ "message": message }))
}

// --------- Events ----------

/// List events.
#[must_use]
pub fn events() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["events"])
}

/// Create an event.
#[must_use]
pub fn create_event(body: Value) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["events"]).with_body(body)
}

/// Enrol in an event; the contract expects a literal empty JSON object.
#[must_use]
pub fn enroll_in_event(event_id: &str) -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Post, &["events", event_id, "enroll"])
        .with_body(Value::Object(Map::new()))
}

// --------- Notifications ----------

/// List the caller's notifications.
#[must_use]
pub fn notifications() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["notifications"])
}

// --------- Health ----------

/// Backend health probe; requires no authentication by contract, though an
/// attached bearer token is harmless.
#[must_use]
pub fn health() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, &["healthz"])
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the operation table and URL rendering.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn config() -> ApiConfig {
        let base: Url = "http://127.0.0.1:8000".parse().expect("valid base");
        ApiConfig::new(base, "/api").expect("config validates")
    }

    #[rstest]
    #[case(profile(), HttpMethod::Get, "/profiles/me")]
    #[case(update_profile(json!({"bio": "hi"})), HttpMethod::Put, "/profiles/me")]
    #[case(help_requests(&ListFilter::new()), HttpMethod::Get, "/rfh")]
    #[case(help_request("r1"), HttpMethod::Get, "/rfh/r1")]
    #[case(create_help_request(json!({})), HttpMethod::Post, "/rfh")]
    #[case(helper_matches("abc123"), HttpMethod::Get, "/match/abc123")]
    #[case(content_items(&ListFilter::new()), HttpMethod::Get, "/content")]
    #[case(create_content(json!({})), HttpMethod::Post, "/content")]
    #[case(questions(&ListFilter::new()), HttpMethod::Get, "/qa/questions")]
    #[case(create_question(json!({})), HttpMethod::Post, "/qa/questions")]
    #[case(question_answers("q7"), HttpMethod::Get, "/qa/questions/q7/answers")]
    #[case(create_answer(json!({})), HttpMethod::Post, "/qa/answers")]
    #[case(projects(), HttpMethod::Get, "/projects")]
    #[case(create_project(json!({})), HttpMethod::Post, "/projects")]
    #[case(apply_to_project("p1", None), HttpMethod::Post, "/projects/p1/apply")]
    #[case(events(), HttpMethod::Get, "/events")]
    #[case(create_event(json!({})), HttpMethod::Post, "/events")]
    #[case(enroll_in_event("e1"), HttpMethod::Post, "/events/e1/enroll")]
    #[case(notifications(), HttpMethod::Get, "/notifications")]
    #[case(health(), HttpMethod::Get, "/healthz")]
    fn operations_resolve_to_the_contract_table(
        #[case] descriptor: RequestDescriptor,
        #[case] method: HttpMethod,
        #[case] path: &str,
    ) {
        assert_eq!(descriptor.method(), method);
        assert_eq!(descriptor.path(), path);
    }

    #[rstest]
    fn absent_filters_emit_no_query_entries() {
        let descriptor = help_requests(&ListFilter::new());
        assert!(descriptor.query().is_empty());

        let url = descriptor.url(&config()).expect("url renders");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/rfh");
        assert!(url.query().is_none(), "no `q=` or `tag=` fragment expected");
    }

    #[rstest]
    #[case(ListFilter::new().with_query(""))]
    #[case(ListFilter::new().with_query("   "))]
    #[case(ListFilter::new().with_tag(""))]
    fn blank_filter_values_are_treated_as_absent(#[case] filter: ListFilter) {
        let descriptor = help_requests(&filter);
        assert!(descriptor.query().is_empty());
    }

    #[rstest]
    fn supplied_filters_reach_the_query_string() {
        let filter = ListFilter::new().with_query("advice").with_tag("mentoring");
        let url = questions(&filter).url(&config()).expect("url renders");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/qa/questions?q=advice&tag=mentoring"
        );
    }

    #[rstest]
    fn tag_only_listing_matches_the_wire_contract() {
        let filter = ListFilter::new().with_tag("mentoring");
        let url = help_requests(&filter).url(&config()).expect("url renders");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/rfh?tag=mentoring");
    }

    #[rstest]
    fn path_parameters_are_component_encoded_at_render_time() {
        let descriptor = help_request("needs review");
        assert_eq!(descriptor.path(), "/rfh/needs review");

        let url = descriptor.url(&config()).expect("url renders");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/rfh/needs%20review");
    }

    #[rstest]
    fn base_urls_with_paths_keep_their_segments() {
        let base: Url = "https://api.example.net/svc/".parse().expect("valid base");
        let config = ApiConfig::new(base, "api").expect("config validates");
        let url = notifications().url(&config).expect("url renders");
        assert_eq!(url.as_str(), "https://api.example.net/svc/api/notifications");
    }

    #[rstest]
    fn apply_body_always_carries_the_message_key() {
        let with_message = apply_to_project("p1", Some("Interested!"));
        assert_eq!(with_message.body(), Some(&json!({"message": "Interested!"})));

        let without_message = apply_to_project("p1", None);
        assert_eq!(without_message.body(), Some(&json!({"message": null})));
    }

    #[rstest]
    fn enrolment_posts_an_empty_object() {
        let descriptor = enroll_in_event("e9");
        assert_eq!(descriptor.body(), Some(&json!({})));
    }

    #[rstest]
    fn list_bodies_are_absent_and_create_bodies_are_kept() {
        assert!(events().body().is_none());
        let body = json!({"title": "Need advice"});
        assert_eq!(create_help_request(body.clone()).body(), Some(&body));
    }
}
