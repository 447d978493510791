//! Circle endpoints: the upstream's view, normalized.

use axum::{
    extract::{Extension, Path},
    http::HeaderMap,
    Json,
};

use super::{authenticate, Source};
use crate::aggregate::Aggregator;
use crate::model::{CircleInfo, Member};
use crate::rest::{ApiError, ProblemDetails};

/// List circles
///
/// Returns every circle visible to the credential, in upstream order.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/circles",
    tag = "Circles",
    responses(
        (status = 200, description = "Circles visible to the credential", body = Vec<CircleInfo>),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn list_circles(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<Vec<CircleInfo>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.circles().await?))
}

/// List circle members
///
/// Returns the normalized roster of one circle.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing, the circle does
/// not exist, or the upstream cannot be queried.
#[utoipa::path(
    get,
    path = "/circles/{circle_id}/members",
    tag = "Circles",
    params(
        ("circle_id" = String, Path, description = "Circle identifier")
    ),
    responses(
        (status = 200, description = "Normalized circle roster", body = Vec<Member>),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 404, description = "Circle not found upstream", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn list_circle_members(
    Extension(source): Source,
    Path(circle_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Member>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.circle_members(&circle_id).await?))
}

/// Get one member
///
/// Returns a single normalized member of a circle.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing, the member does
/// not exist, or the upstream cannot be queried.
#[utoipa::path(
    get,
    path = "/circles/{circle_id}/members/{member_id}",
    tag = "Circles",
    params(
        ("circle_id" = String, Path, description = "Circle identifier"),
        ("member_id" = String, Path, description = "Member identifier")
    ),
    responses(
        (status = 200, description = "Normalized member", body = Member),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 404, description = "Member not found upstream", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn get_member(
    Extension(source): Source,
    Path((circle_id, member_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Member>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.member(&circle_id, &member_id).await?))
}
