//! Cleanup layer between [`crate::upstream::types`] and [`crate::model`].
//!
//! Rules of the layer:
//! - Field-level noise degrades: an unparsable battery or speed becomes
//!   `None`, a missing name becomes empty. Each drop is logged at `debug`.
//! - Record identity is load-bearing: a member or circle without an id is an
//!   error, never a guess.
//! - A position without usable coordinates is dropped whole; partial
//!   locations are never fabricated.

pub mod location;
pub mod member;
pub mod status;

pub use location::parse_location;
pub use member::normalize_member;
pub use status::classify;

use thiserror::Error;

use crate::model::CircleInfo;
use crate::upstream::types::{RawCircle, RawScalar};

/// A raw record violated a constraint normalization cannot repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("member record carries no id")]
    MissingMemberId,
    #[error("circle record carries no id")]
    MissingCircleId,
}

/// Normalize a raw circle.
///
/// Only the id is required. A missing name becomes empty and the creation
/// time keeps its canonical text form.
///
/// # Errors
///
/// [`NormalizeError::MissingCircleId`] when the record has no usable id.
pub fn normalize_circle(raw: &RawCircle) -> Result<CircleInfo, NormalizeError> {
    let id = raw
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(NormalizeError::MissingCircleId)?;

    Ok(CircleInfo {
        id: id.to_string(),
        name: raw.name.clone().unwrap_or_default(),
        created_at: raw
            .created_at
            .as_ref()
            .map(RawScalar::to_text)
            .unwrap_or_default(),
    })
}
