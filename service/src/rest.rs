//! REST error surface and `OpenAPI` documentation.
//!
//! Handlers return [`ApiError`]; every failure leaves the service as an RFC
//! 7807 problem document with a stable machine-readable `extensions.code`.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Serialize, Serializer};
use thiserror::Error;
use utoipa::{OpenApi, ToSchema};

use crate::aggregate::AggregateError;
use crate::model::{
    CircleInfo, CircleStatistics, Location, LowBatteryMember, Member, MemberLocation,
    MemberStatus, SearchResult, TokenValidation,
};
use crate::upstream::UpstreamError;

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    #[schema(example = "https://circleview.dev/errors/upstream")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// URI reference identifying the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Extended error information carrying stable error codes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    /// Machine-readable error code
    #[schema(example = "UPSTREAM_ERROR")]
    pub code: String,
    /// Parameter that caused the error (for validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ProblemDetails {
    fn new(status: StatusCode, slug: &str, title: &str, detail: String, code: &str) -> Self {
        Self {
            problem_type: format!("https://circleview.dev/errors/{slug}"),
            title: title.to_string(),
            status,
            detail,
            instance: None,
            extensions: Some(ProblemExtensions {
                code: code.to_string(),
                field: None,
            }),
        }
    }

    fn with_field(mut self, field: &str) -> Self {
        if let Some(extensions) = &mut self.extensions {
            extensions.field = Some(field.to_string());
        }
        self
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// Failure of a REST operation, one variant per caller-visible cause.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Neither the request nor the configuration carried a bearer token.
    #[error("no credentials provided")]
    MissingCredentials,

    /// Assembling the response from upstream data failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl ApiError {
    fn problem(&self) -> ProblemDetails {
        match self {
            Self::MissingCredentials => ProblemDetails::new(
                StatusCode::UNAUTHORIZED,
                "missing-credentials",
                "Missing Credentials",
                "Provide a bearer token in the Authorization header or configure a default."
                    .to_string(),
                "MISSING_CREDENTIALS",
            ),
            Self::Aggregate(AggregateError::Upstream(UpstreamError::Auth { status })) => {
                ProblemDetails::new(
                    StatusCode::UNAUTHORIZED,
                    "upstream-auth",
                    "Upstream Rejected Credentials",
                    format!("The upstream service rejected the bearer token (status {status})."),
                    "UPSTREAM_AUTH",
                )
            }
            Self::Aggregate(AggregateError::Upstream(UpstreamError::NotFound(what))) => {
                ProblemDetails::new(
                    StatusCode::NOT_FOUND,
                    "not-found",
                    "Not Found",
                    format!("No such resource upstream: {what}."),
                    "NOT_FOUND",
                )
            }
            Self::Aggregate(AggregateError::Upstream(error)) => ProblemDetails::new(
                StatusCode::BAD_GATEWAY,
                "upstream",
                "Upstream Unavailable",
                format!("The upstream service could not be queried: {error}."),
                "UPSTREAM_ERROR",
            ),
            Self::Aggregate(AggregateError::Normalize(error)) => ProblemDetails::new(
                StatusCode::BAD_GATEWAY,
                "upstream-data",
                "Upstream Data Invalid",
                format!("The upstream service returned an unusable record: {error}."),
                "UPSTREAM_DATA",
            ),
            Self::Aggregate(AggregateError::EmptySearch) => ProblemDetails::new(
                StatusCode::BAD_REQUEST,
                "invalid-parameter",
                "Invalid Parameter",
                "The name parameter must not be empty.".to_string(),
                "INVALID_PARAMETER",
            )
            .with_field("name"),
            Self::Aggregate(AggregateError::ThresholdOutOfRange(threshold)) => {
                ProblemDetails::new(
                    StatusCode::BAD_REQUEST,
                    "invalid-parameter",
                    "Invalid Parameter",
                    format!("The threshold parameter must be within 0-100, got {threshold}."),
                    "INVALID_PARAMETER",
                )
                .with_field("threshold")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let problem = self.problem();
        if problem.status.is_server_error() {
            tracing::warn!(error = %self, status = problem.status.as_u16(), "request failed");
        }
        problem.into_response()
    }
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CircleView API",
        version = "1.0.0",
        description = "REST API over a location-sharing service: normalized circles, members, locations and analytics",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(
        crate::api::circles::list_circles,
        crate::api::circles::list_circle_members,
        crate::api::circles::get_member,
        crate::api::members::all_members,
        crate::api::members::active_members,
        crate::api::members::search_members,
        crate::api::members::current_user,
        crate::api::locations::member_locations,
        crate::api::locations::driving_members,
        crate::api::analytics::statistics,
        crate::api::analytics::low_battery,
        crate::api::auth::validate_token,
    ),
    components(schemas(
        CircleInfo,
        CircleStatistics,
        Location,
        LowBatteryMember,
        Member,
        MemberLocation,
        MemberStatus,
        ProblemDetails,
        ProblemExtensions,
        SearchResult,
        TokenValidation,
    ))
)]
pub struct ApiDoc;
