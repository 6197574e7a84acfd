//! Points and badge accrual for student activity.
//!
//! The engine is a pure state transition: it never touches storage, so callers load the
//! student, apply an [`AwardEvent`], and persist the returned [`Standing`] themselves.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Points a student needs before a named badge may be granted, unless the event overrides it.
pub const DEFAULT_BADGE_THRESHOLD: u64 = 50;

/// Distinct badge labels held by a student.
pub type BadgeSet = BTreeSet<String>;

/// Request to increase a student's points and conditionally grant a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardEvent {
    pub points: i64,
    pub badge: Option<String>,
    pub threshold: u64,
}

impl AwardEvent {
    pub fn points(points: i64) -> Self {
        Self {
            points,
            badge: None,
            threshold: DEFAULT_BADGE_THRESHOLD,
        }
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Points and badges after an award has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub points: u64,
    pub badges: BadgeSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newly_awarded: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GamificationError {
    #[error("award must add a positive number of points, got {0}")]
    InvalidDelta(i64),
    #[error("awarding {delta} points to a balance of {current} overflows")]
    Overflow { current: u64, delta: u64 },
}

/// Stateless rule applying award events to a student's standing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamificationEngine;

impl GamificationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn award(
        &self,
        current_points: u64,
        current_badges: &BadgeSet,
        event: &AwardEvent,
    ) -> Result<Standing, GamificationError> {
        if event.points <= 0 {
            return Err(GamificationError::InvalidDelta(event.points));
        }
        let delta = event.points as u64;
        let points = current_points
            .checked_add(delta)
            .ok_or(GamificationError::Overflow {
                current: current_points,
                delta,
            })?;

        let mut badges = current_badges.clone();
        let newly_awarded = match event.badge.as_deref() {
            // threshold is inclusive
            Some(badge) if points >= event.threshold && !badges.contains(badge) => {
                badges.insert(badge.to_string());
                Some(badge.to_string())
            }
            _ => None,
        };

        Ok(Standing {
            points,
            badges,
            newly_awarded,
        })
    }
}
