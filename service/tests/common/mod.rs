//! Common test utilities for integration tests.
//!
//! This module provides:
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps that mirror main.rs wiring
//! - [`factories`] - Builders for raw upstream payloads with realistic defaults
//!
//! # App Builder Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_app() {
//!     let app = TestAppBuilder::with_mocks().build();
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! See [`app_builder`] module for preset builders and configuration options.
//!
//! # Factory Usage
//!
//! Factories build payloads in the upstream's own wire encoding (numbers as
//! strings, flags as `"0"`/`"1"`), so the same data drives both wiremock
//! stubs (`.json()`) and a programmed `MockCircleClient` (`.raw()`):
//!
//! ```ignore
//! use crate::common::factories::{CircleFactory, MemberFactory};
//!
//! let circle = CircleFactory::new().with_name("Family").raw();
//! let member = MemberFactory::new().with_name("Ada", "Lovelace").raw();
//! ```

pub mod app_builder;
pub mod factories;
