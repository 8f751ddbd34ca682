//! Request-shaped issue API over an [`IssueStore`].
//!
//! [`IssueService`] is the boundary every client uses. Each call mirrors a
//! REST endpoint (`GET /api/issues`, `PUT /api/issues/{id}`, ...), logs the
//! request, validates input, waits the configured latency and then calls the
//! store. Absence reported by the store becomes
//! [`Error::IssueNotFound`].
//!
//! Failures are returned as [`ApiError`], which names the request that
//! failed alongside the underlying [`Error`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tracklet::domain::{IssuePriority, IssueStatus, NewIssue};
//! use tracklet::error::ErrorKind;
//! use tracklet::service::IssueService;
//! use tracklet::storage::{create_store, StoreBackend, StoreOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = create_store(StoreBackend::InMemory, StoreOptions::default()).await?;
//!     let service = IssueService::new(store).with_latency(Duration::ZERO);
//!
//!     let err = service
//!         .create_issue(NewIssue {
//!             title: "  ".to_string(),
//!             description: "B".to_string(),
//!             status: IssueStatus::Open,
//!             priority: IssuePriority::Low,
//!         })
//!         .await
//!         .unwrap_err();
//!     assert_eq!(err.kind(), ErrorKind::Validation);
//!     assert_eq!(err.to_string(), "POST /api/issues: Title is required");
//!     Ok(())
//! }
//! ```

use crate::domain::{Issue, IssueId, IssueUpdate, NewIssue};
use crate::error::{Error, ErrorKind};
use crate::storage::IssueStore;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Base path of the logical issue endpoints.
pub const API_BASE_PATH: &str = "/api/issues";

/// Latency the interactive front end simulates by default.
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(300);

/// HTTP-style verb of a logical request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read
    Get,
    /// Create
    Post,
    /// Update
    Put,
    /// Remove
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A logical request: method plus endpoint path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Request verb
    pub method: Method,
    /// Endpoint path, e.g. `/api/issues/42`
    pub path: String,
}

impl ApiRequest {
    fn collection(method: Method) -> Self {
        Self {
            method,
            path: API_BASE_PATH.to_string(),
        }
    }

    fn item(method: Method, id: &IssueId) -> Self {
        Self {
            method,
            path: format!("{API_BASE_PATH}/{id}"),
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A failed service call.
#[derive(Debug, Error)]
#[error("{request}: {source}")]
pub struct ApiError {
    /// The request that failed
    pub request: ApiRequest,
    /// Why it failed
    #[source]
    pub source: Error,
}

impl ApiError {
    /// Classify the failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// Whether the referenced issue did not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Whether the input was rejected.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Consume the wrapper, returning the underlying error.
    #[must_use]
    pub fn into_inner(self) -> Error {
        self.source
    }
}

/// Result of a service call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The issue API.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
    latency: Duration,
}

impl fmt::Debug for IssueService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueService")
            .field("latency", &self.latency)
            .field("store", &"<dyn IssueStore>")
            .finish()
    }
}

impl IssueService {
    /// Create a service over `store` with no simulated latency.
    #[must_use]
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
        }
    }

    /// Set the delay applied to every call before it reaches the store.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The configured simulated latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// `GET /api/issues`: every issue in the store.
    ///
    /// # Errors
    ///
    /// Fails only on storage errors.
    pub async fn get_all_issues(&self) -> ApiResult<Vec<Issue>> {
        let request = ApiRequest::collection(Method::Get);
        log_request(&request, None::<&()>);
        self.simulate_latency().await;

        self.store.load_all().await.map_err(|e| fail(&request, e))
    }

    /// `GET /api/issues/{id}`: one issue.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IssueNotFound`] if no issue has this ID.
    pub async fn get_issue_by_id(&self, id: &IssueId) -> ApiResult<Issue> {
        let request = ApiRequest::item(Method::Get, id);
        log_request(&request, None::<&()>);
        self.simulate_latency().await;

        self.store
            .get_by_id(id)
            .await
            .and_then(|found| found.ok_or_else(|| Error::IssueNotFound(id.clone())))
            .map_err(|e| fail(&request, e))
    }

    /// `POST /api/issues`: create an issue.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] if the title or description is
    /// blank. Validation happens before the simulated latency.
    pub async fn create_issue(&self, fields: NewIssue) -> ApiResult<Issue> {
        let request = ApiRequest::collection(Method::Post);
        log_request(&request, Some(&fields));

        fields.validate().map_err(|e| fail(&request, e.into()))?;
        self.simulate_latency().await;

        self.store.create(fields).await.map_err(|e| fail(&request, e))
    }

    /// `PUT /api/issues/{id}`: merge `patch` into an issue.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] if a supplied title or description
    /// is blank, or [`Error::IssueNotFound`] if no issue has this ID.
    pub async fn update_issue(&self, id: &IssueId, patch: IssueUpdate) -> ApiResult<Issue> {
        let request = ApiRequest::item(Method::Put, id);
        log_request(&request, Some(&patch));

        patch.validate().map_err(|e| fail(&request, e.into()))?;
        self.simulate_latency().await;

        self.store
            .update(id, patch)
            .await
            .and_then(|found| found.ok_or_else(|| Error::IssueNotFound(id.clone())))
            .map_err(|e| fail(&request, e))
    }

    /// `DELETE /api/issues/{id}`: remove an issue.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IssueNotFound`] if no issue was removed.
    pub async fn delete_issue(&self, id: &IssueId) -> ApiResult<()> {
        let request = ApiRequest::item(Method::Delete, id);
        log_request(&request, None::<&()>);
        self.simulate_latency().await;

        match self.store.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(fail(&request, Error::IssueNotFound(id.clone()))),
            Err(e) => Err(fail(&request, e)),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn fail(request: &ApiRequest, source: Error) -> ApiError {
    ApiError {
        request: request.clone(),
        source,
    }
}

fn log_request<T: Serialize>(request: &ApiRequest, payload: Option<&T>) {
    let payload = payload
        .and_then(|p| serde_json::to_string(p).ok())
        .unwrap_or_default();
    info!(
        target: "tracklet::api",
        method = %request.method,
        endpoint = %request.path,
        timestamp = %Utc::now().to_rfc3339(),
        payload = %payload,
        "API request"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssuePriority, IssueStatus};
    use crate::storage::{FailingStore, StoreBackend, StoreOptions, create_store};
    use tokio::time::Instant;

    async fn service() -> IssueService {
        let store = create_store(StoreBackend::InMemory, StoreOptions::default())
            .await
            .unwrap();
        IssueService::new(store)
    }

    fn fields(title: &str, description: &str) -> NewIssue {
        NewIssue {
            title: title.to_string(),
            description: description.to_string(),
            status: IssueStatus::Open,
            priority: IssuePriority::Low,
        }
    }

    #[test]
    fn request_display() {
        let request = ApiRequest::item(Method::Delete, &IssueId::new("7"));
        assert_eq!(request.to_string(), "DELETE /api/issues/7");
        assert_eq!(
            ApiRequest::collection(Method::Get).to_string(),
            "GET /api/issues"
        );
    }

    #[tokio::test]
    async fn not_found_message_names_request_and_reason() {
        let service = service().await;

        let err = service
            .get_issue_by_id(&IssueId::new("nope"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "GET /api/issues/nope: Issue not found: nope"
        );
    }

    #[tokio::test]
    async fn update_validation_wins_over_not_found() {
        let service = service().await;
        let patch = IssueUpdate {
            description: Some(" ".to_string()),
            ..Default::default()
        };

        let err = service
            .update_issue(&IssueId::new("missing"), patch)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "PUT /api/issues/missing: Description cannot be empty"
        );
    }

    #[tokio::test]
    async fn storage_failures_are_not_reported_as_not_found() {
        let service = IssueService::new(Arc::new(FailingStore::new()));

        let err = service.delete_issue(&IssueId::new("1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err = service.get_issue_by_id(&IssueId::new("1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err = service.get_all_issues().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test(start_paused = true)]
    async fn every_call_waits_the_configured_latency() {
        let service = service().await.with_latency(Duration::from_millis(300));

        let start = Instant::now();
        service.get_all_issues().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));

        let start = Instant::now();
        let created = service.create_issue(fields("A", "B")).await.unwrap();
        service.delete_issue(&created.id).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn validation_failures_return_before_the_delay() {
        let service = service().await.with_latency(Duration::from_secs(5));

        let start = Instant::now();
        let err = service.create_issue(fields("", "B")).await.unwrap_err();

        assert!(err.is_validation());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn default_latency_is_zero() {
        let service = service().await;
        assert_eq!(service.latency(), Duration::ZERO);
    }
}
