//! Client for the upstream location-sharing API.
//!
//! This module provides a trait-based HTTP client for the third-party
//! circle service. The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with wiremock in integration tests
//! - Swapping implementations (e.g., a different upstream provider)
//!
//! # Example
//!
//! ```ignore
//! use circleview_api::upstream::{CircleApiClient, HttpCircleClient};
//!
//! let client = HttpCircleClient::new("https://api.example.com/v4", "my-token");
//! let circles = client.list_circles().await?;
//! println!("visible circles: {}", circles.len());
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{CirclesResponse, MembersResponse, RawCircle, RawMember};
use crate::config::UpstreamConfig;

/// Errors that can occur when calling the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream rejected the bearer token
    #[error("upstream rejected credentials (status {status})")]
    Auth { status: u16 },

    /// Resource not found
    #[error("not found upstream: {0}")]
    NotFound(String),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Trait for upstream circle operations.
///
/// Implementations fetch raw circle and member data. Use
/// [`HttpCircleClient`] for real HTTP calls, or [`mock::MockCircleClient`]
/// in tests.
#[async_trait]
pub trait CircleApiClient: Send + Sync {
    /// List every circle visible to the credential.
    async fn list_circles(&self) -> Result<Vec<RawCircle>, UpstreamError>;

    /// List the raw roster of one circle.
    async fn list_circle_members(&self, circle_id: &str)
        -> Result<Vec<RawMember>, UpstreamError>;

    /// Fetch a single member of a circle.
    async fn get_circle_member(
        &self,
        circle_id: &str,
        member_id: &str,
    ) -> Result<RawMember, UpstreamError>;

    /// Fetch the member record of the authenticated user.
    async fn get_current_user(&self) -> Result<RawMember, UpstreamError>;
}

/// HTTP-based implementation of [`CircleApiClient`].
///
/// Makes real HTTP requests with a bearer token against the upstream API.
pub struct HttpCircleClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpCircleClient {
    /// Create a new client with the given base URL and bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Create a client with a custom `reqwest::Client` (for timeouts or
    /// connection pooling configured elsewhere).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            token: token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &str,
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(UpstreamError::Auth {
                status: status.as_u16(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(context.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CircleApiClient for HttpCircleClient {
    async fn list_circles(&self) -> Result<Vec<RawCircle>, UpstreamError> {
        let response: CirclesResponse = self.get_json("/circles", "circles").await?;
        Ok(response.circles)
    }

    async fn list_circle_members(
        &self,
        circle_id: &str,
    ) -> Result<Vec<RawMember>, UpstreamError> {
        let response: MembersResponse = self
            .get_json(&format!("/circles/{circle_id}/members"), circle_id)
            .await?;
        Ok(response.members)
    }

    async fn get_circle_member(
        &self,
        circle_id: &str,
        member_id: &str,
    ) -> Result<RawMember, UpstreamError> {
        self.get_json(
            &format!("/circles/{circle_id}/members/{member_id}"),
            member_id,
        )
        .await
    }

    async fn get_current_user(&self) -> Result<RawMember, UpstreamError> {
        self.get_json("/members/me", "me").await
    }
}

/// Source of authenticated upstream clients.
///
/// The REST layer resolves one client per request from the caller's bearer
/// token; test builds substitute a fixed client instead.
pub trait ClientSource: Send + Sync {
    /// Build a client for the given request credential. `None` when neither
    /// the request nor the configuration carries a token.
    fn client_for(&self, bearer: Option<&str>) -> Option<Arc<dyn CircleApiClient>>;

    /// Parallelism bound for cross-circle roster fetches.
    fn fan_out(&self) -> usize;
}

/// Production [`ClientSource`] backed by one shared `reqwest::Client`.
///
/// Request tokens win over the configured default token. The connection
/// pool is shared across requests; only the credential differs per client.
#[derive(Clone)]
pub struct ClientProvider {
    client: reqwest::Client,
    base_url: String,
    default_token: Option<String>,
    fan_out: usize,
}

impl ClientProvider {
    /// Build the provider from the upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest` error when the TLS backend cannot be
    /// initialized.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            default_token: config.token.clone(),
            fan_out: config.fan_out,
        })
    }
}

impl ClientSource for ClientProvider {
    fn client_for(&self, bearer: Option<&str>) -> Option<Arc<dyn CircleApiClient>> {
        let token = bearer
            .map(str::to_string)
            .or_else(|| self.default_token.clone())?;

        Some(Arc::new(HttpCircleClient::with_client(
            self.client.clone(),
            self.base_url.clone(),
            token,
        )))
    }

    fn fan_out(&self) -> usize {
        self.fan_out
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{CircleApiClient, UpstreamError};
    use crate::upstream::types::{RawCircle, RawMember};

    /// Mock implementation of [`CircleApiClient`] for unit tests.
    ///
    /// Configure responses with the `set_*_result` methods and verify
    /// traffic with the `*_calls` accessors. Each configured result is
    /// consumed by the first matching call; afterwards lists fall back to
    /// empty and lookups to not-found.
    pub struct MockCircleClient {
        circles_result: Mutex<Option<Result<Vec<RawCircle>, UpstreamError>>>,
        members_results: Mutex<HashMap<String, Result<Vec<RawMember>, UpstreamError>>>,
        member_results: Mutex<HashMap<(String, String), Result<RawMember, UpstreamError>>>,
        current_user_result: Mutex<Option<Result<RawMember, UpstreamError>>>,
        circles_calls: Mutex<usize>,
        members_calls: Mutex<Vec<String>>,
        member_calls: Mutex<Vec<(String, String)>>,
    }

    impl MockCircleClient {
        pub fn new() -> Self {
            Self {
                circles_result: Mutex::new(None),
                members_results: Mutex::new(HashMap::new()),
                member_results: Mutex::new(HashMap::new()),
                current_user_result: Mutex::new(None),
                circles_calls: Mutex::new(0),
                members_calls: Mutex::new(Vec::new()),
                member_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `list_circles` call.
        pub fn set_circles_result(&self, result: Result<Vec<RawCircle>, UpstreamError>) {
            *self.circles_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `list_circle_members` call for one
        /// circle.
        pub fn set_members_result(
            &self,
            circle_id: &str,
            result: Result<Vec<RawMember>, UpstreamError>,
        ) {
            self.members_results
                .lock()
                .unwrap()
                .insert(circle_id.to_string(), result);
        }

        /// Set the result for the next `get_circle_member` call for one
        /// member.
        pub fn set_member_result(
            &self,
            circle_id: &str,
            member_id: &str,
            result: Result<RawMember, UpstreamError>,
        ) {
            self.member_results
                .lock()
                .unwrap()
                .insert((circle_id.to_string(), member_id.to_string()), result);
        }

        /// Set the result for the next `get_current_user` call.
        pub fn set_current_user_result(&self, result: Result<RawMember, UpstreamError>) {
            *self.current_user_result.lock().unwrap() = Some(result);
        }

        /// Number of `list_circles` calls made.
        pub fn circles_calls(&self) -> usize {
            *self.circles_calls.lock().unwrap()
        }

        /// Circle ids passed to `list_circle_members`, in call order.
        pub fn members_calls(&self) -> Vec<String> {
            self.members_calls.lock().unwrap().clone()
        }

        /// Pairs passed to `get_circle_member`, in call order.
        pub fn member_calls(&self) -> Vec<(String, String)> {
            self.member_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCircleClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CircleApiClient for MockCircleClient {
        async fn list_circles(&self) -> Result<Vec<RawCircle>, UpstreamError> {
            *self.circles_calls.lock().unwrap() += 1;

            self.circles_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn list_circle_members(
            &self,
            circle_id: &str,
        ) -> Result<Vec<RawMember>, UpstreamError> {
            self.members_calls
                .lock()
                .unwrap()
                .push(circle_id.to_string());

            self.members_results
                .lock()
                .unwrap()
                .remove(circle_id)
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get_circle_member(
            &self,
            circle_id: &str,
            member_id: &str,
        ) -> Result<RawMember, UpstreamError> {
            self.member_calls
                .lock()
                .unwrap()
                .push((circle_id.to_string(), member_id.to_string()));

            self.member_results
                .lock()
                .unwrap()
                .remove(&(circle_id.to_string(), member_id.to_string()))
                .unwrap_or_else(|| Err(UpstreamError::NotFound(member_id.to_string())))
        }

        async fn get_current_user(&self) -> Result<RawMember, UpstreamError> {
            self.current_user_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(UpstreamError::NotFound("me".to_string())))
        }
    }
}
