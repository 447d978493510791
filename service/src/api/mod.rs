//! REST handlers for the versioned API.
//!
//! Every handler follows the same shape: resolve a per-request upstream
//! client from the caller's bearer token (falling back to the configured
//! default), run one [`Aggregator`] operation, serialize the typed result.
//! Failures funnel through [`crate::rest::ApiError`].

pub mod analytics;
pub mod auth;
pub mod circles;
pub mod locations;
pub mod members;

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::rest::ApiError;
use crate::upstream::{CircleApiClient, ClientSource};

/// Router for everything mounted under `/api/v1`.
pub fn router() -> Router {
    Router::new()
        .route("/circles", get(circles::list_circles))
        .route("/circles/{circle_id}/members", get(circles::list_circle_members))
        .route(
            "/circles/{circle_id}/members/{member_id}",
            get(circles::get_member),
        )
        .route("/members/all", get(members::all_members))
        .route("/members/active", get(members::active_members))
        .route("/members/search", get(members::search_members))
        .route("/members/me", get(members::current_user))
        .route("/locations", get(locations::member_locations))
        .route("/locations/driving", get(locations::driving_members))
        .route("/analytics/statistics", get(analytics::statistics))
        .route("/analytics/battery/low", get(analytics::low_battery))
        .route("/auth/validate", post(auth::validate_token))
}

/// Liveness probe. Deliberately unauthenticated and outside `/api/v1`.
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Resolve the upstream client for a request.
///
/// The `Authorization` header wins when present; `Bearer ` prefixes are
/// stripped so callers may send either form. Without a header the
/// configured default token applies.
pub(crate) fn authenticate(
    source: &dyn ClientSource,
    headers: &HeaderMap,
) -> Result<Arc<dyn CircleApiClient>, ApiError> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .filter(|token| !token.is_empty());

    source
        .client_for(bearer)
        .ok_or(ApiError::MissingCredentials)
}

/// Shorthand for the `Extension` every handler extracts.
pub(crate) type Source = Extension<Arc<dyn ClientSource>>;
