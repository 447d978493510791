//! Member and location factories for raw upstream payloads.

use circleview_api::upstream::types::RawMember;
use serde_json::{json, Value};

use super::next_id;

/// Builder for raw location payloads in the upstream's text encoding.
///
/// Defaults describe a healthy report: Berlin coordinates, 80% battery, a
/// fixed timestamp, not driving.
pub struct LocationFactory {
    latitude: String,
    longitude: String,
    accuracy: String,
    battery: Option<String>,
    timestamp: String,
    speed: String,
    is_driving: String,
    name: Option<String>,
}

impl LocationFactory {
    /// Create a new factory with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latitude: "52.520008".to_string(),
            longitude: "13.404954".to_string(),
            accuracy: "10".to_string(),
            battery: Some("80".to_string()),
            timestamp: "1700000000".to_string(),
            speed: "0.0".to_string(),
            is_driving: "0".to_string(),
            name: None,
        }
    }

    /// Set the coordinates, in the upstream's text form.
    #[must_use]
    pub fn at(mut self, latitude: &str, longitude: &str) -> Self {
        self.latitude = latitude.to_string();
        self.longitude = longitude.to_string();
        self
    }

    /// Set the reported accuracy radius.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: &str) -> Self {
        self.accuracy = accuracy.to_string();
        self
    }

    /// Set the battery reading.
    #[must_use]
    pub fn with_battery(mut self, battery: &str) -> Self {
        self.battery = Some(battery.to_string());
        self
    }

    /// Drop the battery reading entirely.
    #[must_use]
    pub fn without_battery(mut self) -> Self {
        self.battery = None;
        self
    }

    /// Set the report time, epoch seconds in text form.
    #[must_use]
    pub fn with_timestamp(mut self, epoch: &str) -> Self {
        self.timestamp = epoch.to_string();
        self
    }

    /// Set the speed reading.
    #[must_use]
    pub fn with_speed(mut self, speed: &str) -> Self {
        self.speed = speed.to_string();
        self
    }

    /// Mark the member as driving.
    #[must_use]
    pub fn driving(mut self) -> Self {
        self.is_driving = "1".to_string();
        self
    }

    /// Set the place label.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// The payload as upstream JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        json!({
            "latitude": self.latitude,
            "longitude": self.longitude,
            "accuracy": self.accuracy,
            "battery": self.battery,
            "timestamp": self.timestamp,
            "speed": self.speed,
            "isDriving": self.is_driving,
            "name": self.name,
        })
    }
}

impl Default for LocationFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for raw member payloads with realistic defaults.
///
/// The default member is connected, shares location, and carries the default
/// [`LocationFactory`] report, so it normalizes to an Active member.
///
/// # Examples
///
/// ```ignore
/// // A located Active member with a unique name
/// let member = MemberFactory::new().raw();
///
/// // A disconnected member with a low battery
/// let member = MemberFactory::new()
///     .disconnected()
///     .with_location(LocationFactory::new().with_battery("9"))
///     .raw();
/// ```
pub struct MemberFactory {
    id: String,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    login_phone: Option<String>,
    login_email: Option<String>,
    communications: Vec<Value>,
    disconnected: bool,
    share_location: bool,
    location: Option<Value>,
}

impl MemberFactory {
    /// Create a new factory with unique default settings.
    #[must_use]
    pub fn new() -> Self {
        let n = next_id();
        Self {
            id: format!("member-{n}"),
            first_name: format!("Member{n}"),
            last_name: "Example".to_string(),
            avatar: None,
            login_phone: None,
            login_email: None,
            communications: Vec::new(),
            disconnected: false,
            share_location: true,
            location: Some(LocationFactory::new().json()),
        }
    }

    /// Set a specific member id. An empty id makes the record unusable.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Set the first and last name.
    #[must_use]
    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = first.to_string();
        self.last_name = last.to_string();
        self
    }

    /// Set the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, url: &str) -> Self {
        self.avatar = Some(url.to_string());
        self
    }

    /// Set the login phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: &str) -> Self {
        self.login_phone = Some(phone.to_string());
        self
    }

    /// Set the login email address.
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.login_email = Some(email.to_string());
        self
    }

    /// Append a communications entry.
    #[must_use]
    pub fn with_communication(mut self, channel: &str, value: &str) -> Self {
        self.communications
            .push(json!({"channel": channel, "value": value}));
        self
    }

    /// Flag the member's device as disconnected.
    #[must_use]
    pub fn disconnected(mut self) -> Self {
        self.disconnected = true;
        self
    }

    /// Switch location sharing off for the member.
    #[must_use]
    pub fn location_off(mut self) -> Self {
        self.share_location = false;
        self
    }

    /// Drop the location report entirely.
    #[must_use]
    pub fn without_location(mut self) -> Self {
        self.location = None;
        self
    }

    /// Replace the location report.
    #[must_use]
    pub fn with_location(mut self, location: LocationFactory) -> Self {
        self.location = Some(location.json());
        self
    }

    /// Replace the location report with an arbitrary JSON value.
    #[must_use]
    pub fn with_location_json(mut self, location: Value) -> Self {
        self.location = Some(location);
        self
    }

    /// The payload as upstream JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        json!({
            "id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "avatar": self.avatar,
            "loginPhone": self.login_phone,
            "loginEmail": self.login_email,
            "communications": self.communications,
            "issues": {"disconnected": if self.disconnected { "1" } else { "0" }},
            "features": {"shareLocation": if self.share_location { "1" } else { "0" }},
            "location": self.location,
        })
    }

    /// The payload as the typed record a mock client serves.
    ///
    /// # Panics
    ///
    /// Panics if the payload fails to deserialize.
    #[must_use]
    pub fn raw(&self) -> RawMember {
        serde_json::from_value(self.json()).expect("MemberFactory: payload should deserialize")
    }
}

impl Default for MemberFactory {
    fn default() -> Self {
        Self::new()
    }
}
