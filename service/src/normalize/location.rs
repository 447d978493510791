//! Position parsing: raw wire location to typed [`Location`].

use tracing::debug;

use crate::model::Location;
use crate::upstream::types::{RawLocation, RawScalar};

/// Parse a raw position report.
///
/// Coordinates decide the record's fate: when either latitude or longitude
/// is missing or does not read as a finite number, the whole report is
/// dropped and `None` is returned. Every other field degrades on its own:
/// accuracy falls back to 0, battery and speed to absent, the timestamp to
/// an empty string. Out-of-range coordinates are clamped, not dropped.
#[must_use]
pub fn parse_location(raw: Option<&RawLocation>) -> Option<Location> {
    let raw = raw?;

    let Some(latitude) = coordinate(raw.latitude.as_ref(), 90.0) else {
        debug!(value = ?raw.latitude, "dropping location: latitude unusable");
        return None;
    };
    let Some(longitude) = coordinate(raw.longitude.as_ref(), 180.0) else {
        debug!(value = ?raw.longitude, "dropping location: longitude unusable");
        return None;
    };

    Some(Location {
        latitude,
        longitude,
        accuracy: parse_accuracy(raw.accuracy.as_ref()),
        name: raw.name.clone(),
        address1: raw.address1.clone(),
        address2: raw.address2.clone(),
        battery: parse_battery(raw.battery.as_ref()),
        timestamp: raw
            .timestamp
            .as_ref()
            .map(RawScalar::to_text)
            .unwrap_or_default(),
        speed: parse_speed(raw.speed.as_ref()),
        is_driving: raw.is_driving.as_ref().is_some_and(|flag| flag.is("1")),
    })
}

/// Battery percentage: float reading truncated to an integer, then clamped
/// to [0, 100]. Unreadable values are absent, never defaulted.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_battery(raw: Option<&RawScalar>) -> Option<u8> {
    raw.and_then(RawScalar::as_f64)
        .filter(|value| value.is_finite())
        .map(|value| (value as i64).clamp(0, 100) as u8)
}

fn coordinate(raw: Option<&RawScalar>, limit: f64) -> Option<f64> {
    raw.and_then(RawScalar::as_f64)
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(-limit, limit))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_accuracy(raw: Option<&RawScalar>) -> u32 {
    raw.and_then(RawScalar::as_f64)
        .filter(|value| value.is_finite())
        .map_or(0, |value| value.max(0.0) as u32)
}

fn parse_speed(raw: Option<&RawScalar>) -> Option<f64> {
    raw.and_then(RawScalar::as_f64)
        .filter(|value| value.is_finite() && *value >= 0.0)
}
