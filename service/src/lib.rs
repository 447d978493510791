#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod aggregate;
pub mod analytics;
pub mod api;
pub mod config;
pub mod model;
pub mod normalize;
pub mod rest;
pub mod upstream;
