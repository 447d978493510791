//! Test data factories for reducing test setup boilerplate.
//!
//! Factories build raw payloads in the upstream's own wire encoding: numbers
//! as strings, flags as `"0"`/`"1"`, subobjects present. Finish with
//! `.json()` for a wiremock body fragment or `.raw()` for the typed record a
//! programmed `MockCircleClient` serves.
//!
//! # Usage
//!
//! ```ignore
//! use common::factories::{CircleFactory, LocationFactory, MemberFactory};
//!
//! let circle = CircleFactory::new().with_name("Family").raw();
//! let member = MemberFactory::new()
//!     .with_name("Ada", "Lovelace")
//!     .with_location(LocationFactory::new().with_battery("42").driving())
//!     .raw();
//! ```

mod circle;
mod member;

pub use circle::CircleFactory;
pub use member::{LocationFactory, MemberFactory};

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique test data.
/// Each call to `next_id()` returns a unique value across all tests.
static FACTORY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Returns a unique ID for generating test data.
/// Thread-safe and guaranteed unique within a test run.
pub fn next_id() -> u64 {
    FACTORY_COUNTER.fetch_add(1, Ordering::SeqCst)
}
