//! Analytics endpoints: per-circle statistics and battery reports.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{authenticate, Source};
use crate::aggregate::Aggregator;
use crate::model::{CircleStatistics, LowBatteryMember};
use crate::rest::{ApiError, ProblemDetails};

/// Query parameters for the low battery report.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LowBatteryParams {
    /// Battery percentage cutoff, inclusive. Defaults to 20.
    pub threshold: Option<i64>,
}

/// Circle statistics
///
/// Returns presence counts, mean battery and freshness per circle.
///
/// # Errors
///
/// Returns `ProblemDetails` when credentials are missing or the upstream
/// cannot be queried.
#[utoipa::path(
    get,
    path = "/analytics/statistics",
    tag = "Analytics",
    responses(
        (status = 200, description = "Per-circle statistics", body = Vec<CircleStatistics>),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn statistics(
    Extension(source): Source,
    headers: HeaderMap,
) -> Result<Json<Vec<CircleStatistics>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    Ok(Json(aggregator.statistics().await?))
}

/// Low battery report
///
/// Returns Active members at or below the threshold, sorted ascending so
/// the most urgent member comes first.
///
/// # Errors
///
/// Returns `ProblemDetails` when the threshold is out of range, credentials
/// are missing, or the upstream cannot be queried.
#[utoipa::path(
    get,
    path = "/analytics/battery/low",
    tag = "Analytics",
    params(LowBatteryParams),
    responses(
        (status = 200, description = "Members with low battery, ascending", body = Vec<LowBatteryMember>),
        (status = 400, description = "Threshold outside 0-100", body = ProblemDetails),
        (status = 401, description = "Missing or rejected credentials", body = ProblemDetails),
        (status = 502, description = "Upstream failure", body = ProblemDetails)
    )
)]
pub async fn low_battery(
    Extension(source): Source,
    Query(params): Query<LowBatteryParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<LowBatteryMember>>, ApiError> {
    let client = authenticate(source.as_ref(), &headers)?;
    let aggregator = Aggregator::new(client.as_ref(), source.fan_out());
    let threshold = params.threshold.unwrap_or(20);
    Ok(Json(aggregator.low_battery(threshold).await?))
}
