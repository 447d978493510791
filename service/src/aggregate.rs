//! Cross-circle aggregation.
//!
//! Every multi-circle view is derived from one roster pass:
//! [`Aggregator::rosters`] fetches the member list of each visible circle
//! with bounded concurrency, normalizes it, and returns rosters in upstream
//! circle order. The views (member maps, flattened locations, search,
//! driving, analytics) are pure folds over that pass, so no view ever
//! re-fetches a member it already has.

use std::collections::HashSet;

use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use thiserror::Error;

use crate::analytics;
use crate::model::{
    CircleInfo, CircleRoster, CircleStatistics, LowBatteryMember, Member, MemberLocation,
    MemberStatus, SearchResult,
};
use crate::normalize::{normalize_circle, normalize_member, NormalizeError};
use crate::upstream::types::RawCircle;
use crate::upstream::{CircleApiClient, UpstreamError};

/// Members grouped by circle name, in upstream circle order.
pub type MembersByCircle = IndexMap<String, Vec<Member>>;

/// Errors produced while assembling a cross-circle view.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// An upstream record violated a hard constraint.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// A search was requested with an empty term.
    #[error("search term must not be empty")]
    EmptySearch,

    /// A battery threshold outside the percentage range was requested.
    #[error("battery threshold {0} is outside 0-100")]
    ThresholdOutOfRange(i64),
}

/// Assembles normalized views across every circle a credential can see.
///
/// Holds a borrowed client; construction is free and handlers build one per
/// request.
pub struct Aggregator<'a> {
    client: &'a dyn CircleApiClient,
    fan_out: usize,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator fetching at most `fan_out` rosters at once.
    pub fn new(client: &'a dyn CircleApiClient, fan_out: usize) -> Self {
        Self {
            client,
            fan_out: fan_out.max(1),
        }
    }

    /// List the normalized circles visible to the credential.
    ///
    /// # Errors
    ///
    /// Fails when the upstream call fails or a circle carries no id.
    pub async fn circles(&self) -> Result<Vec<CircleInfo>, AggregateError> {
        let raw = self.client.list_circles().await?;
        let circles = raw
            .iter()
            .map(normalize_circle)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(circles)
    }

    /// Normalized roster of a single circle.
    ///
    /// # Errors
    ///
    /// Fails when the upstream call fails or a member carries no id.
    pub async fn circle_members(&self, circle_id: &str) -> Result<Vec<Member>, AggregateError> {
        let raw = self.client.list_circle_members(circle_id).await?;
        let members = raw
            .iter()
            .map(normalize_member)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }

    /// A single normalized member of a circle.
    ///
    /// # Errors
    ///
    /// Fails when the upstream call fails or the record carries no id.
    pub async fn member(&self, circle_id: &str, member_id: &str) -> Result<Member, AggregateError> {
        let raw = self.client.get_circle_member(circle_id, member_id).await?;
        Ok(normalize_member(&raw)?)
    }

    /// The authenticated user's own normalized member record.
    ///
    /// # Errors
    ///
    /// Fails when the upstream call fails or the record carries no id.
    pub async fn current_user(&self) -> Result<Member, AggregateError> {
        let raw = self.client.get_current_user().await?;
        Ok(normalize_member(&raw)?)
    }

    /// Every circle with its normalized roster, in upstream circle order.
    ///
    /// Rosters are fetched concurrently, at most `fan_out` in flight; the
    /// order of the output never depends on completion order. One failed
    /// circle fails the whole pass.
    ///
    /// # Errors
    ///
    /// Fails when any upstream call fails or any record carries no id.
    pub async fn rosters(&self) -> Result<Vec<CircleRoster>, AggregateError> {
        let circles = self.client.list_circles().await?;

        stream::iter(circles.into_iter().map(|raw| self.roster(raw)))
            .buffered(self.fan_out)
            .try_collect()
            .await
    }

    async fn roster(&self, raw: RawCircle) -> Result<CircleRoster, AggregateError> {
        let circle = normalize_circle(&raw)?;
        let members = self.circle_members(&circle.id).await?;
        Ok(CircleRoster { circle, members })
    }

    /// All members keyed by circle name.
    ///
    /// Circles sharing a name collide; the later circle's roster wins the
    /// key while keeping the first circle's position.
    ///
    /// # Errors
    ///
    /// Propagates [`Aggregator::rosters`] failures.
    pub async fn members_by_circle(&self) -> Result<MembersByCircle, AggregateError> {
        let rosters = self.rosters().await?;
        Ok(rosters
            .into_iter()
            .map(|roster| (roster.circle.name, roster.members))
            .collect())
    }

    /// Active members with a usable position, keyed by circle name. Circles
    /// with no such member are omitted entirely.
    ///
    /// # Errors
    ///
    /// Propagates [`Aggregator::rosters`] failures.
    pub async fn active_members(&self) -> Result<MembersByCircle, AggregateError> {
        let rosters = self.rosters().await?;
        let mut grouped = MembersByCircle::new();

        for roster in rosters {
            let active: Vec<Member> = roster
                .members
                .into_iter()
                .filter(is_active_with_location)
                .collect();
            if !active.is_empty() {
                grouped.insert(roster.circle.name, active);
            }
        }

        Ok(grouped)
    }

    /// Member positions flattened with circle context.
    ///
    /// With `only_active` set, members without an Active status or without a
    /// usable position are skipped; otherwise every member appears, position
    /// or not.
    ///
    /// # Errors
    ///
    /// Propagates [`Aggregator::rosters`] failures.
    pub async fn member_locations(
        &self,
        only_active: bool,
    ) -> Result<Vec<MemberLocation>, AggregateError> {
        let rosters = self.rosters().await?;
        let mut rows = Vec::new();

        for roster in &rosters {
            for member in &roster.members {
                if only_active && !is_active_with_location(member) {
                    continue;
                }
                rows.push(MemberLocation {
                    circle_id: roster.circle.id.clone(),
                    circle_name: roster.circle.name.clone(),
                    member_id: member.id.clone(),
                    member_name: member.full_name.clone(),
                    location: member.location.clone(),
                    status: member.status,
                });
            }
        }

        Ok(rows)
    }

    /// Case-insensitive substring search over full names, across circles.
    ///
    /// # Errors
    ///
    /// [`AggregateError::EmptySearch`] before any upstream call when `name`
    /// is empty; otherwise propagates [`Aggregator::rosters`] failures.
    pub async fn search_members(&self, name: &str) -> Result<Vec<SearchResult>, AggregateError> {
        if name.is_empty() {
            return Err(AggregateError::EmptySearch);
        }
        let needle = name.to_lowercase();

        let rosters = self.rosters().await?;
        let mut hits = Vec::new();

        for roster in rosters {
            for member in roster.members {
                if member.full_name.to_lowercase().contains(&needle) {
                    hits.push(SearchResult {
                        circle: roster.circle.name.clone(),
                        circle_id: roster.circle.id.clone(),
                        member,
                    });
                }
            }
        }

        Ok(hits)
    }

    /// Members currently driving, deduplicated across circles.
    ///
    /// A member in several circles appears once, from the first circle that
    /// reports them; the normalized record is carried straight out of the
    /// roster pass.
    ///
    /// # Errors
    ///
    /// Propagates [`Aggregator::rosters`] failures.
    pub async fn driving_members(&self) -> Result<Vec<Member>, AggregateError> {
        let rosters = self.rosters().await?;
        let mut seen = HashSet::new();
        let mut driving = Vec::new();

        for roster in rosters {
            for member in roster.members {
                let is_driving = member
                    .location
                    .as_ref()
                    .is_some_and(|location| location.is_driving);
                if member.status == MemberStatus::Active
                    && is_driving
                    && seen.insert(member.id.clone())
                {
                    driving.push(member);
                }
            }
        }

        Ok(driving)
    }

    /// Presence and battery statistics, one entry per circle.
    ///
    /// # Errors
    ///
    /// Propagates [`Aggregator::rosters`] failures.
    pub async fn statistics(&self) -> Result<Vec<CircleStatistics>, AggregateError> {
        let rosters = self.rosters().await?;
        let now_epoch = Utc::now().timestamp();

        Ok(rosters
            .iter()
            .map(|roster| analytics::circle_statistics(&roster.circle, &roster.members, now_epoch))
            .collect())
    }

    /// Active members at or below `threshold` percent battery, ascending.
    ///
    /// # Errors
    ///
    /// [`AggregateError::ThresholdOutOfRange`] before any upstream call when
    /// the threshold is outside [0, 100]; otherwise propagates
    /// [`Aggregator::rosters`] failures.
    pub async fn low_battery(
        &self,
        threshold: i64,
    ) -> Result<Vec<LowBatteryMember>, AggregateError> {
        if !(0..=100).contains(&threshold) {
            return Err(AggregateError::ThresholdOutOfRange(threshold));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let threshold = threshold as u8;

        let rosters = self.rosters().await?;
        Ok(analytics::low_battery_report(&rosters, threshold))
    }
}

fn is_active_with_location(member: &Member) -> bool {
    member.status == MemberStatus::Active && member.location.is_some()
}
