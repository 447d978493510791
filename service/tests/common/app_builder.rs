//! Test app builder that mirrors main.rs wiring with injectable upstream clients.
//!
//! This module provides a [`TestAppBuilder`] that constructs an Axum router matching
//! the production configuration in `main.rs`, but with the ability to inject mock
//! upstream clients and test-specific configurations.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_programmed_mock() {
//!     let mock = Arc::new(MockCircleClient::new());
//!     mock.set_circles_result(Ok(vec![]));
//!
//!     let app = TestAppBuilder::new()
//!         .with_api()
//!         .with_client(mock.clone())
//!         .with_cors(&["http://localhost:3000"])
//!         .build();
//!
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::with_mocks()`] - Full API backed by an unprogrammed mock client
//! - [`TestAppBuilder::without_upstream()`] - Full API where no credential resolves a client

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use circleview_api::api;
use circleview_api::rest::ApiDoc;
use circleview_api::upstream::{mock::MockCircleClient, CircleApiClient, ClientSource};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// [`ClientSource`] that serves one fixed client to every request, header or
/// not. Behaves like a provider with a configured default token.
struct FixedClient {
    client: Arc<dyn CircleApiClient>,
    fan_out: usize,
}

impl ClientSource for FixedClient {
    fn client_for(&self, _bearer: Option<&str>) -> Option<Arc<dyn CircleApiClient>> {
        Some(self.client.clone())
    }

    fn fan_out(&self) -> usize {
        self.fan_out
    }
}

/// [`ClientSource`] that never resolves a client. Behaves like a provider
/// with no default token receiving requests without an Authorization header.
struct NoClient;

impl ClientSource for NoClient {
    fn client_for(&self, _bearer: Option<&str>) -> Option<Arc<dyn CircleApiClient>> {
        None
    }

    fn fan_out(&self) -> usize {
        1
    }
}

/// Builder for test applications that mirrors main.rs wiring.
///
/// Use the builder pattern to construct an Axum router with the same layer
/// ordering and configuration as production, while injecting mock upstream
/// clients instead of real HTTP connections.
pub struct TestAppBuilder {
    /// Whether to include the versioned API routes under /api/v1
    include_api: bool,
    /// Whether to include the health check route
    include_health: bool,
    /// Whether to include Swagger UI
    include_swagger: bool,
    /// Fixed upstream client served to every request
    client: Option<Arc<dyn CircleApiClient>>,
    /// Full client source override (wins over `client`)
    source: Option<Arc<dyn ClientSource>>,
    /// CORS allowed origins (None means no CORS layer)
    cors_origins: Option<Vec<String>>,
    /// Roster fetch parallelism reported by the injected source
    fan_out: usize,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_api: false,
            include_health: false,
            include_swagger: false,
            client: None,
            source: None,
            cors_origins: None,
            fan_out: 4,
        }
    }

    // =========================================================================
    // Preset Builders
    // =========================================================================

    /// Create a minimal app with only the health check endpoint.
    ///
    /// Use this for simple connectivity tests.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new().with_health()
    }

    /// Create a full app backed by an unprogrammed mock client.
    ///
    /// The mock serves empty circle lists and not-found lookups until
    /// programmed; inject a programmed mock with [`Self::with_client`] when a
    /// test needs data.
    #[must_use]
    pub fn with_mocks() -> Self {
        Self::new()
            .with_api()
            .with_client(Arc::new(MockCircleClient::new()))
            .with_health()
            .with_cors(&["http://localhost:3000"])
    }

    /// Create a full app where no credential resolves an upstream client.
    ///
    /// Every API request fails with the missing-credentials problem, which is
    /// what a deployment without a default token does for anonymous callers.
    #[must_use]
    pub fn without_upstream() -> Self {
        Self::new()
            .with_api()
            .with_health()
            .with_source(Arc::new(NoClient))
    }

    // =========================================================================
    // Component Configuration
    // =========================================================================

    /// Include the versioned API routes (/api/v1/*).
    #[must_use]
    pub fn with_api(mut self) -> Self {
        self.include_api = true;
        self
    }

    /// Include health check route (/health).
    #[must_use]
    pub fn with_health(mut self) -> Self {
        self.include_health = true;
        self
    }

    /// Include Swagger UI (/swagger-ui) and the OpenAPI document.
    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.include_swagger = true;
        self
    }

    /// Serve one fixed upstream client to every request.
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn CircleApiClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Install a custom [`ClientSource`]. Wins over [`Self::with_client`].
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ClientSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Roster fetch parallelism reported to the aggregation layer.
    #[must_use]
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Configure CORS with specific allowed origins.
    ///
    /// Pass an empty slice to block all cross-origin requests.
    /// Pass `&["*"]` to allow any origin.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().map(|s| (*s).to_string()).collect());
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the Axum router.
    ///
    /// The layer ordering matches main.rs:
    /// 1. Routes (API, Swagger, Health)
    /// 2. Extension carrying the client source
    /// 3. CORS layer (outermost)
    #[must_use]
    pub fn build(self) -> Router {
        let mut app = Router::new();

        if self.include_api {
            app = app.nest("/api/v1", api::router());
        }

        if self.include_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        if self.include_health {
            app = app.route("/health", get(api::health_check));
        }

        let fan_out = self.fan_out;
        let source = self.source.or_else(|| {
            self.client
                .map(|client| Arc::new(FixedClient { client, fan_out }) as Arc<dyn ClientSource>)
        });
        if let Some(source) = source {
            app = app.layer(Extension(source));
        }

        if let Some(origins) = self.cors_origins {
            let allow_origin: AllowOrigin = if origins.iter().any(|o| o == "*") {
                AllowOrigin::any()
            } else if origins.is_empty() {
                AllowOrigin::list(Vec::<HeaderValue>::new())
            } else {
                let header_values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect();
                AllowOrigin::list(header_values)
            };

            app = app.layer(
                CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers(Any)
                    .allow_origin(allow_origin),
            );
        }

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_minimal_builder_creates_health_route() {
        let app = TestAppBuilder::minimal().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_with_mocks_serves_empty_circles() {
        let app = TestAppBuilder::with_mocks().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/circles")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_without_upstream_rejects_every_credential() {
        let app = TestAppBuilder::without_upstream().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/circles")
                    .header("Authorization", "Bearer some-token")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
