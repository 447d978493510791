//! Upstream location-sharing API module.
//!
//! Provides the HTTP client abstraction for fetching raw circle and member
//! data from the third-party service.
//!
//! # Architecture
//!
//! The module uses a trait-based design for testability:
//!
//! - [`CircleApiClient`] - Trait defining the upstream operations
//! - [`HttpCircleClient`] - Real HTTP implementation using reqwest
//! - [`ClientSource`] / [`ClientProvider`] - Per-request client resolution
//!   from bearer tokens
//! - [`mock::MockCircleClient`] - Mock for unit tests (behind `test-utils`
//!   feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! Use `MockCircleClient` for fast, isolated unit tests:
//!
//! ```ignore
//! use circleview_api::upstream::mock::MockCircleClient;
//!
//! let mock = MockCircleClient::new();
//! mock.set_circles_result(Ok(vec![ /* raw circles */ ]));
//! mock.set_members_result("c1", Ok(vec![ /* raw members */ ]));
//!
//! // Pass mock to code under test
//! let rosters = Aggregator::new(&mock, 4).rosters().await?;
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! Use wiremock to test `HttpCircleClient` against stubbed HTTP:
//!
//! ```ignore
//! use wiremock::{matchers, Mock, MockServer, ResponseTemplate};
//! use circleview_api::upstream::HttpCircleClient;
//!
//! let server = MockServer::start().await;
//! Mock::given(matchers::method("GET"))
//!     .and(matchers::path("/circles"))
//!     .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
//!         "circles": [{"id": "c1", "name": "Family"}]
//!     })))
//!     .mount(&server)
//!     .await;
//!
//! let client = HttpCircleClient::new(server.uri(), "test-token");
//! let circles = client.list_circles().await.unwrap();
//! assert_eq!(circles.len(), 1);
//! ```

mod client;
pub mod types;

pub use client::{
    CircleApiClient, ClientProvider, ClientSource, HttpCircleClient, UpstreamError,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
