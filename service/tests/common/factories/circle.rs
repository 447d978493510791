//! Circle factory for raw upstream payloads.

use circleview_api::upstream::types::RawCircle;
use serde_json::{json, Value};

use super::next_id;

/// Builder for raw circle payloads with realistic defaults.
///
/// # Examples
///
/// ```ignore
/// // Unique id and name per call
/// let circle = CircleFactory::new().raw();
///
/// // Pin the fields a test asserts on
/// let circle = CircleFactory::new().with_id("c1").with_name("Family").raw();
/// ```
pub struct CircleFactory {
    id: String,
    name: String,
    created_at: String,
}

impl CircleFactory {
    /// Create a new factory with unique default settings.
    #[must_use]
    pub fn new() -> Self {
        let n = next_id();
        Self {
            id: format!("circle-{n}"),
            name: format!("Circle {n}"),
            created_at: "1609459200".to_string(),
        }
    }

    /// Set a specific circle id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Set a specific circle name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the creation time, epoch seconds in the upstream's text form.
    #[must_use]
    pub fn created_at(mut self, epoch: &str) -> Self {
        self.created_at = epoch.to_string();
        self
    }

    /// The payload as upstream JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "createdAt": self.created_at,
        })
    }

    /// The payload as the typed record a mock client serves.
    ///
    /// # Panics
    ///
    /// Panics if the payload fails to deserialize.
    #[must_use]
    pub fn raw(&self) -> RawCircle {
        serde_json::from_value(self.json()).expect("CircleFactory: payload should deserialize")
    }
}

impl Default for CircleFactory {
    fn default() -> Self {
        Self::new()
    }
}
