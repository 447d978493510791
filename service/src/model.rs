//! Canonical entities served by the REST API.
//!
//! Everything here is fully typed: coordinates are floats, battery is an
//! integer percentage, flags are booleans. The only way to obtain these
//! values is through [`crate::normalize`], so a handler never sees the
//! upstream's stringly wire forms.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A parsed, validated position report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    /// Degrees, clamped to [-90, 90].
    #[schema(example = 52.52)]
    pub latitude: f64,
    /// Degrees, clamped to [-180, 180].
    #[schema(example = 13.405)]
    pub longitude: f64,
    /// Reported accuracy radius in meters, 0 when unknown.
    pub accuracy: u32,
    /// Place label, e.g. "Home".
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    /// Battery percentage in [0, 100], absent when unreported.
    #[schema(example = 73)]
    pub battery: Option<u8>,
    /// Report time as epoch seconds in text form, empty when unreported.
    #[schema(example = "1749949224")]
    pub timestamp: String,
    /// Speed in m/s, absent when unreported or negative.
    pub speed: Option<f64>,
    pub is_driving: bool,
}

/// Presence classification for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MemberStatus {
    /// Connected and sharing location.
    Active,
    /// Device unreachable.
    Disconnected,
    /// Location sharing switched off.
    #[serde(rename = "Location Off")]
    LocationOff,
    /// Sharing enabled but no position on record.
    #[serde(rename = "No Location")]
    NoLocation,
}

/// A normalized circle member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    #[schema(example = "a2f1c0e8-77b5-4e2e-9c1b-2f8d3a1b5c77")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// First and last name joined, trimmed when either is missing.
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    pub status: MemberStatus,
    /// Missing when no parseable position is on record.
    pub location: Option<Location>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A normalized circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CircleInfo {
    #[schema(example = "b0d2f9a4-3c6e-4f2a-8d1b-9e5c7a0f3b21")]
    pub id: String,
    #[schema(example = "Family")]
    pub name: String,
    /// Creation time as epoch seconds in text form, empty when unreported.
    pub created_at: String,
}

/// One circle with its normalized roster, the unit every cross-circle view
/// is derived from.
#[derive(Debug, Clone)]
pub struct CircleRoster {
    pub circle: CircleInfo,
    pub members: Vec<Member>,
}

/// A member's position flattened with its circle context.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberLocation {
    pub circle_id: String,
    pub circle_name: String,
    pub member_id: String,
    pub member_name: String,
    pub location: Option<Location>,
    pub status: MemberStatus,
}

/// Per-circle presence and battery summary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CircleStatistics {
    pub circle_id: String,
    pub circle_name: String,
    pub total_members: usize,
    pub active_members: usize,
    pub disconnected_members: usize,
    pub location_off_members: usize,
    /// Mean battery over active members that report one, rounded to one
    /// decimal; absent when none report.
    #[schema(example = 72.5)]
    pub average_battery: Option<f64>,
    /// Epoch seconds of the freshest active position, in text form. Falls
    /// back to the current time when no member reports a timestamp.
    #[schema(example = "1749949224")]
    pub last_update: String,
}

/// A member whose battery is at or below the requested threshold.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LowBatteryMember {
    pub circle: String,
    pub member: String,
    #[schema(example = 15)]
    pub battery: u8,
    /// Place label of the last position, "Unknown" when unnamed.
    pub location: String,
}

/// A name search hit with its circle context.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub circle: String,
    pub circle_id: String,
    pub member: Member,
}

/// Outcome of a credential check against the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenValidation {
    pub valid: bool,
    /// Circles visible to the credential.
    pub circles_count: usize,
}
