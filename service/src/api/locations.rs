//! Location endpoints: flattened positions and driving members.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{authenticate, Source};
use crate::aggregate::Aggregator;
use crate::model::{Member, MemberLocation};
use crate::rest::{ApiError, ProblemDetails};

/// Query parameters for the flattened location list.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LocationParams {
    /// Restrict to Active members with a usable position. Defaults to true.
    #[serde(default = "default_only_active")]
    pub only_active: bool,
}

fn default_only_active() -> bool {
    true
}

/// List member locations
///
/// Returns one row per member with their position and circle context. By
/// default only Active members with a usable position appear; pass
/// `only_active=false` for everyone.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/locations",
    tag = "Locations",
    params(LocationParams),
    responses(
        (status = 200, description = "Member positions with circle context", body = Vec<MemberLocation>),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn member_locations(
    Extension(source): Source,
    Query(params): Query<LocationParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<MemberLocation>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.member_locations(params.only_active).await?))
}

/// List driving members
///
/// Returns members currently driving, deduplicated across circles; a member
/// in several circles appears once, from the first circle reporting them.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/locations/driving",
    tag = "Locations",
    responses(
        (status = 200, description = "Members currently driving", body = Vec<Member>),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn driving_members(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<Vec<Member>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.driving_members().await?))
}
