//! Presence and battery analytics over normalized rosters.
//!
//! Pure functions over [`CircleRoster`] data; the current time is a
//! parameter so results are reproducible. Only [`crate::aggregate`] decides
//! where the rosters and the clock come from.

use crate::model::{
    CircleInfo, CircleRoster, CircleStatistics, LowBatteryMember, Member, MemberStatus,
};

/// Summarize one circle's presence and battery state.
///
/// Battery and freshness look only at Active members with a parsed
/// position: the mean battery covers those that report one (rounded to one
/// decimal, absent when none do) and `last_update` is their freshest epoch
/// timestamp, falling back to `now_epoch` when nobody reports a usable one.
#[must_use]
pub fn circle_statistics(
    circle: &CircleInfo,
    members: &[Member],
    now_epoch: i64,
) -> CircleStatistics {
    let mut active = 0;
    let mut disconnected = 0;
    let mut location_off = 0;
    let mut battery_sum: i64 = 0;
    let mut battery_count: usize = 0;
    let mut latest: i64 = 0;

    for member in members {
        match member.status {
            MemberStatus::Active => {
                active += 1;
                if let Some(location) = &member.location {
                    if let Some(battery) = location.battery {
                        battery_sum += i64::from(battery);
                        battery_count += 1;
                    }
                    if let Ok(timestamp) = location.timestamp.parse::<i64>() {
                        latest = latest.max(timestamp);
                    }
                }
            }
            MemberStatus::Disconnected => disconnected += 1,
            MemberStatus::LocationOff => location_off += 1,
            MemberStatus::NoLocation => {}
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_battery =
        (battery_count > 0).then(|| round_to_tenth(battery_sum as f64 / battery_count as f64));
    let last_update = if latest > 0 { latest } else { now_epoch };

    CircleStatistics {
        circle_id: circle.id.clone(),
        circle_name: circle.name.clone(),
        total_members: members.len(),
        active_members: active,
        disconnected_members: disconnected,
        location_off_members: location_off,
        average_battery,
        last_update: last_update.to_string(),
    }
}

/// Active members at or below `threshold` percent battery, across all
/// rosters, sorted by battery ascending. Members without an Active status
/// or without a reported battery never appear. The sort is stable, so equal
/// batteries keep roster order.
#[must_use]
pub fn low_battery_report(rosters: &[CircleRoster], threshold: u8) -> Vec<LowBatteryMember> {
    let mut report = Vec::new();

    for roster in rosters {
        for member in &roster.members {
            if member.status != MemberStatus::Active {
                continue;
            }
            let Some(location) = &member.location else {
                continue;
            };
            let Some(battery) = location.battery else {
                continue;
            };
            if battery <= threshold {
                report.push(LowBatteryMember {
                    circle: roster.circle.name.clone(),
                    member: member.full_name.clone(),
                    battery,
                    location: location
                        .name
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                });
            }
        }
    }

    report.sort_by_key(|entry| entry.battery);
    report
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
