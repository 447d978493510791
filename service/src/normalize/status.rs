//! Presence classification.

use crate::model::MemberStatus;
use crate::upstream::types::{RawMember, RawScalar};

/// Classify a member's presence from the raw record.
///
/// Checks run in a fixed order and the first hit wins:
/// 1. `issues.disconnected` reads `"1"`: [`MemberStatus::Disconnected`].
/// 2. `features.shareLocation` reads `"0"`: [`MemberStatus::LocationOff`].
/// 3. No location record at all: [`MemberStatus::NoLocation`].
/// 4. Otherwise [`MemberStatus::Active`].
///
/// Only the raw record's shape matters here. A member whose location is
/// present but later fails to parse still classifies as `Active`; the two
/// concerns stay separate so a garbled position never masks connectivity.
#[must_use]
pub fn classify(member: &RawMember) -> MemberStatus {
    let disconnected = member
        .issues
        .as_ref()
        .and_then(|issues| issues.disconnected.as_ref());
    if flag_is(disconnected, "1") {
        return MemberStatus::Disconnected;
    }

    let sharing = member
        .features
        .as_ref()
        .and_then(|features| features.share_location.as_ref());
    if flag_is(sharing, "0") {
        return MemberStatus::LocationOff;
    }

    if member.location.is_none() {
        return MemberStatus::NoLocation;
    }

    MemberStatus::Active
}

fn flag_is(raw: Option<&RawScalar>, flag: &str) -> bool {
    raw.is_some_and(|value| value.is(flag))
}
