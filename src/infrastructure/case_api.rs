//! Remote case API client.
//!
//! The portal holds no case data of its own; every read and write goes to
//! the remote case API. All operations return an [`ApiEnvelope`] of
//! `{ status, data, message }`, and callers branch only on `status`.
//! Transport-level failures (unreachable host, non-2xx statuses, malformed
//! bodies) surface as [`CaseApiError`] with the original cause preserved
//! for logging.
//!
//! Two implementations: [`HttpCaseApiClient`] over reqwest for production,
//! and [`InMemoryCaseApiClient`] backing local runs and the test suite,
//! which records every write so tests can assert exactly which calls were
//! made.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::CaseReference;

/// Outcome discriminator of an [`ApiEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// The operation was accepted.
    Success,
    /// The operation was rejected; `message` says why.
    Error,
}

/// The `{ status, data, message }` envelope every case API operation
/// returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// Success or error.
    pub status: ApiStatus,
    /// Response payload; `None` for writes and rejected operations.
    #[serde(default)]
    pub data: Option<Value>,
    /// Human-readable detail, usually present on errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// A success envelope carrying data.
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self {
            status: ApiStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// A success envelope with no data (writes).
    #[must_use]
    pub const fn accepted() -> Self {
        Self {
            status: ApiStatus::Success,
            data: None,
            message: None,
        }
    }

    /// An error envelope carrying a message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Whether the envelope reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ApiStatus::Success)
    }
}

/// Transport-level failures talking to the case API.
#[derive(Debug, thiserror::Error)]
pub enum CaseApiError {
    /// The case API could not be reached.
    #[error("failed to reach the case API")]
    Connection(#[source] reqwest::Error),

    /// The case API answered with a non-success HTTP status.
    #[error("case API returned status {status}")]
    UpstreamStatus {
        /// The HTTP status code received.
        status: u16,
    },

    /// The response body did not parse as an envelope.
    #[error("case API returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl CaseApiError {
    /// Whether this failure is an upstream "not found".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UpstreamStatus { status: 404 })
    }
}

/// The case API operations the portal consumes.
#[async_trait]
pub trait CaseApiClient: Send + Sync {
    /// Fetches the client details record for a case.
    async fn get_client_details(
        &self,
        case_reference: &CaseReference,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Applies a partial update to the client details record.
    async fn update_client_details(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Replaces the provider's notes on the case.
    async fn update_provider_notes(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Creates a third-party contact on the case.
    async fn add_third_party_contact(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Replaces the client support needs block.
    async fn update_client_support_needs(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Removes the third-party contact from the case.
    async fn delete_third_party_contact(
        &self,
        case_reference: &CaseReference,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Submits operator feedback for the case.
    async fn submit_operator_feedback(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError>;

    /// Lists the selectable operator feedback types.
    async fn get_feedback_choices(&self) -> Result<ApiEnvelope, CaseApiError>;

    /// Searches cases by free-text query.
    async fn search_cases(&self, query: &str) -> Result<ApiEnvelope, CaseApiError>;

    /// Lists cases, paginated and sorted.
    async fn get_cases(&self, page: u32, sort: &str) -> Result<ApiEnvelope, CaseApiError>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

/// Case API client over HTTP.
pub struct HttpCaseApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpCaseApiClient {
    /// Creates a client against the given base URL.
    ///
    /// When a bearer token is supplied it is attached to every request.
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiEnvelope, CaseApiError> {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(CaseApiError::Connection)?;
        let status = response.status();

        if !status.is_success() {
            return Err(CaseApiError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|error| CaseApiError::MalformedResponse(error.to_string()))
    }
}

#[async_trait]
impl CaseApiClient for HttpCaseApiClient {
    async fn get_client_details(
        &self,
        case_reference: &CaseReference,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/client-details"));
        self.send(self.http.get(url)).await
    }

    async fn update_client_details(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/client-details"));
        self.send(self.http.patch(url).json(payload)).await
    }

    async fn update_provider_notes(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/provider-notes"));
        self.send(self.http.put(url).json(payload)).await
    }

    async fn add_third_party_contact(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/third-party"));
        self.send(self.http.post(url).json(payload)).await
    }

    async fn update_client_support_needs(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/support-needs"));
        self.send(self.http.put(url).json(payload)).await
    }

    async fn delete_third_party_contact(
        &self,
        case_reference: &CaseReference,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/third-party"));
        self.send(self.http.delete(url)).await
    }

    async fn submit_operator_feedback(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url(&format!("/cases/{case_reference}/feedback"));
        self.send(self.http.post(url).json(payload)).await
    }

    async fn get_feedback_choices(&self) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url("/feedback-choices");
        self.send(self.http.get(url)).await
    }

    async fn search_cases(&self, query: &str) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url("/cases/search");
        self.send(self.http.get(url).query(&[("query", query)])).await
    }

    async fn get_cases(&self, page: u32, sort: &str) -> Result<ApiEnvelope, CaseApiError> {
        let url = self.url("/cases");
        self.send(
            self.http
                .get(url)
                .query(&[("page", page.to_string().as_str()), ("sort", sort)]),
        )
        .await
    }
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// One write recorded by the in-memory client.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation name, matching the trait method.
    pub operation: &'static str,
    /// The case the call targeted; empty for case-independent operations.
    pub case_reference: String,
    /// The payload sent, `Value::Null` for payload-less operations.
    pub payload: Value,
}

/// In-memory case API for local runs and tests.
///
/// Seeded with records keyed by case reference; every write is recorded so
/// tests can assert which calls were made and with what payloads. A forced
/// upstream status makes the next call fail, and the third party can be
/// marked removed so deletion answers 404.
#[derive(Debug, Default)]
pub struct InMemoryCaseApiClient {
    records: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<RecordedCall>>,
    forced_status: Mutex<Option<u16>>,
    third_party_removed: Mutex<bool>,
}

impl InMemoryCaseApiClient {
    /// Creates an empty client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a case record.
    pub fn seed_record(&self, case_reference: &str, record: Value) {
        self.records
            .lock()
            .expect("case api lock poisoned")
            .insert(case_reference.to_string(), record);
    }

    /// All writes recorded so far, in call order.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("case api lock poisoned").clone()
    }

    /// Forces every subsequent call to fail with the given HTTP status.
    pub fn force_upstream_status(&self, status: u16) {
        *self.forced_status.lock().expect("case api lock poisoned") = Some(status);
    }

    /// Marks the third party as already removed, so deletion answers 404.
    pub fn mark_third_party_removed(&self) {
        *self.third_party_removed.lock().expect("case api lock poisoned") = true;
    }

    fn check_forced(&self) -> Result<(), CaseApiError> {
        match *self.forced_status.lock().expect("case api lock poisoned") {
            Some(status) => Err(CaseApiError::UpstreamStatus { status }),
            None => Ok(()),
        }
    }

    fn record(&self, operation: &'static str, case_reference: &str, payload: Value) {
        self.calls
            .lock()
            .expect("case api lock poisoned")
            .push(RecordedCall {
                operation,
                case_reference: case_reference.to_string(),
                payload,
            });
    }
}

#[async_trait]
impl CaseApiClient for InMemoryCaseApiClient {
    async fn get_client_details(
        &self,
        case_reference: &CaseReference,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.records
            .lock()
            .expect("case api lock poisoned")
            .get(case_reference.as_str())
            .cloned()
            .map_or(
                Err(CaseApiError::UpstreamStatus { status: 404 }),
                |record| Ok(ApiEnvelope::success(record)),
            )
    }

    async fn update_client_details(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.record("update_client_details", case_reference.as_str(), payload.clone());
        Ok(ApiEnvelope::accepted())
    }

    async fn update_provider_notes(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.record("update_provider_notes", case_reference.as_str(), payload.clone());
        Ok(ApiEnvelope::accepted())
    }

    async fn add_third_party_contact(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.record("add_third_party_contact", case_reference.as_str(), payload.clone());
        Ok(ApiEnvelope::accepted())
    }

    async fn update_client_support_needs(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.record(
            "update_client_support_needs",
            case_reference.as_str(),
            payload.clone(),
        );
        Ok(ApiEnvelope::accepted())
    }

    async fn delete_third_party_contact(
        &self,
        case_reference: &CaseReference,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.record("delete_third_party_contact", case_reference.as_str(), Value::Null);

        if *self.third_party_removed.lock().expect("case api lock poisoned") {
            return Err(CaseApiError::UpstreamStatus { status: 404 });
        }
        Ok(ApiEnvelope::accepted())
    }

    async fn submit_operator_feedback(
        &self,
        case_reference: &CaseReference,
        payload: &Value,
    ) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        self.record("submit_operator_feedback", case_reference.as_str(), payload.clone());
        Ok(ApiEnvelope::accepted())
    }

    async fn get_feedback_choices(&self) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        Ok(ApiEnvelope::success(json!([
            { "id": "compliment", "label": "Compliment" },
            { "id": "complaint", "label": "Complaint" },
            { "id": "suggestion", "label": "Suggestion" },
        ])))
    }

    async fn search_cases(&self, query: &str) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        let records = self.records.lock().expect("case api lock poisoned");
        let matches: Vec<Value> = records
            .iter()
            .filter(|(reference, _)| reference.contains(query))
            .map(|(reference, record)| {
                json!({
                    "caseReference": reference,
                    "fullName": record.get("fullName").cloned().unwrap_or(Value::Null),
                })
            })
            .collect();
        Ok(ApiEnvelope::success(json!({ "results": matches })))
    }

    async fn get_cases(&self, page: u32, sort: &str) -> Result<ApiEnvelope, CaseApiError> {
        self.check_forced()?;
        let records = self.records.lock().expect("case api lock poisoned");
        let mut references: Vec<&String> = records.keys().collect();
        references.sort();
        if sort == "descending" {
            references.reverse();
        }
        let cases: Vec<Value> = references
            .iter()
            .map(|reference| json!({ "caseReference": reference }))
            .collect();
        Ok(ApiEnvelope::success(json!({
            "cases": cases,
            "page": page,
            "totalPages": 1,
        })))
    }
}
