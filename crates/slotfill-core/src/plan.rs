//! Subscription tiers and the limits they imply.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::placement::PlacementParameters;

/// Days a free-tier user waits between two calendar fills.
pub const FREE_TIER_COOLDOWN_DAYS: i64 = 14;

/// Plan a user is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Monthly,
    Annual,
    Lifetime,
}

impl PlanTier {
    /// Every tier except `Free` gets pooled event titles.
    pub fn is_paid(self) -> bool {
        self != PlanTier::Free
    }

    /// How far ahead the calendar may be filled, counted from `now`.
    pub fn horizon_from(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let months = match self {
            PlanTier::Free => return now + Duration::weeks(2),
            PlanTier::Monthly | PlanTier::Annual => 2,
            PlanTier::Lifetime => 4,
        };
        now.checked_add_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Minimum time between successive fills, if any.
    pub fn cooldown(self) -> Option<Duration> {
        match self {
            PlanTier::Free => Some(Duration::days(FREE_TIER_COOLDOWN_DAYS)),
            _ => None,
        }
    }

    /// Standard 30-120 minute events at the given fill percentage.
    pub fn placement_parameters(self, percentage: f64) -> Result<PlacementParameters, ValidationError> {
        PlacementParameters::with_percentage(percentage, self.is_paid())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Monthly => "monthly",
            PlanTier::Annual => "annual",
            PlanTier::Lifetime => "lifetime",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "monthly" => Ok(PlanTier::Monthly),
            "annual" => Ok(PlanTier::Annual),
            "lifetime" => Ok(PlanTier::Lifetime),
            other => Err(ValidationError::invalid_value(
                "plan",
                format!("unknown plan '{other}' (expected free, monthly, annual or lifetime)"),
            )),
        }
    }
}
