//! Cross-circle member endpoints.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{authenticate, Source};
use crate::aggregate::{Aggregator, MembersByCircle};
use crate::model::{Member, SearchResult};
use crate::rest::{ApiError, ProblemDetails};

/// Query parameters for member search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Name fragment to look for, matched case-insensitively.
    #[serde(default)]
    pub name: String,
}

/// List all members
///
/// Returns every member of every visible circle, keyed by circle name.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/members/all",
    tag = "Members",
    responses(
        (status = 200, description = "Members keyed by circle name", body = MembersByCircle),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn all_members(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<MembersByCircle>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.members_by_circle().await?))
}

/// List active members
///
/// Returns members that are Active and carry a usable position, keyed by
/// circle name. Circles without such members are omitted.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/members/active",
    tag = "Members",
    responses(
        (status = 200, description = "Active located members keyed by circle name", body = MembersByCircle),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn active_members(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<MembersByCircle>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.active_members().await?))
}

/// Search members by name
///
/// Case-insensitive substring search over full names, across all circles.
///
/// # Errors
///
/// Returns `ProblemDetails` when the search term is empty, credentials are
/// missing, or the upstream cannot be queried.
#[utoipa::path(
    get,
    path = "/members/search",
    tag = "Members",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching members with circle context", body = Vec<SearchResult>),
        (status = 400, description = "Empty search term", body = ProblemDetails),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn search_members(
    Extension(source): Source,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.search_members(&params.name).await?))
}

/// Get the authenticated member
///
/// Returns the caller's own member record, normalized.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/members/me",
    tag = "Members",
    responses(
        (status = 200, description = "The caller's normalized member record", body = Member),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn current_user(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<Member>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.current_user().await?))
}
