//! Cooldown between successive calendar fills.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::plan::PlanTier;

/// Enforces the minimum spacing between two fills of the same calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooldownGate;

impl CooldownGate {
    /// Fail while `now` is still before the stored next-update date.
    pub fn check(next_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<(), CoreError> {
        match next_update {
            Some(next_update) if now < next_update => Err(CoreError::CooldownActive { next_update }),
            _ => Ok(()),
        }
    }

    /// Next-update date to store after a successful fill at `now`.
    pub fn next_update_after(tier: PlanTier, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        tier.cooldown().map(|cooldown| now + cooldown)
    }
}
