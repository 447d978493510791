//! Wire types for the upstream location-sharing API.
//!
//! The upstream serializes numbers as strings (`"latitude": "52.52"`), flags
//! as `"0"`/`"1"`, and occasionally sends the same field as a bare number.
//! Every field that exhibits this is declared as [`RawScalar`] so a roster
//! fetch never fails on an odd encoding; cleanup happens later in
//! [`crate::normalize`].

use serde::Deserialize;

/// A JSON scalar whose wire encoding is unstable.
///
/// `"52.52"`, `52.52`, `"1"`, `1` and `true` all deserialize; the accessor
/// methods below define one coercion for each reading so the rest of the
/// crate never matches on the wire shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    /// A bare JSON number.
    Number(f64),
    /// A JSON string, possibly holding a number.
    Text(String),
    /// A bare JSON boolean.
    Bool(bool),
}

impl RawScalar {
    /// Numeric reading. Strings are trimmed and parsed; booleans are not
    /// numbers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Canonical text reading.
    ///
    /// Integral numbers print without a fraction, so the number `1` and the
    /// string `"1"` coerce to the same text. Booleans map to `"1"`/`"0"`,
    /// the flag alphabet the upstream itself uses.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => "0".to_string(),
        }
    }

    /// True when the canonical text reading is exactly `flag`.
    #[must_use]
    pub fn is(&self, flag: &str) -> bool {
        self.to_text() == flag
    }
}

/// A circle as the upstream reports it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCircle {
    pub id: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<RawScalar>,
}

/// One entry of a member's `communications` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCommunication {
    /// `"Voice"` or `"Email"`; other channels exist and are ignored.
    pub channel: Option<String>,
    pub value: Option<String>,
}

/// Connectivity problems the upstream attaches to a member.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIssues {
    pub disconnected: Option<RawScalar>,
}

/// Per-member feature switches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFeatures {
    pub share_location: Option<RawScalar>,
}

/// A member's last reported position, untrusted.
///
/// Coordinates, battery, speed and timestamp all arrive in mixed encodings;
/// `name` and the address lines are plain strings when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLocation {
    pub latitude: Option<RawScalar>,
    pub longitude: Option<RawScalar>,
    pub accuracy: Option<RawScalar>,
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub battery: Option<RawScalar>,
    pub timestamp: Option<RawScalar>,
    pub speed: Option<RawScalar>,
    pub is_driving: Option<RawScalar>,
}

/// A circle member as the upstream reports them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMember {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub login_phone: Option<String>,
    pub login_email: Option<String>,
    pub communications: Vec<RawCommunication>,
    pub issues: Option<RawIssues>,
    pub features: Option<RawFeatures>,
    pub location: Option<RawLocation>,
}

/// Response from the circles list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CirclesResponse {
    pub circles: Vec<RawCircle>,
}

/// Response from the circle members endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MembersResponse {
    pub members: Vec<RawMember>,
}
