//! Credential validation endpoint.

use axum::{extract::Extension, http::HeaderMap, Json};

use super::{authenticate, Source};
use crate::aggregate::AggregateError;
use crate::model::TokenValidation;
use crate::rest::{ApiError, ProblemDetails};

/// Validate credentials
///
/// Checks the bearer token against the upstream by listing circles. A valid
/// token reports how many circles it can see; a rejected one yields 401.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or rejected, or
/// the upstream cannot be queried.
#[utoipa::path(
    post,
    path = "/auth/validate",
    tag = "Auth",
    responses(
        (status = 200, description = "Token accepted by the upstream", body = TokenValidation),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn validate_token(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<TokenValidation>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let circles = client
        .list_circles()
        .await
        .map_err(AggregateError::from)?;

    Ok(Json(TokenValidation {
        valid: true,
        circles_count: circles.len(),
    }))
}
