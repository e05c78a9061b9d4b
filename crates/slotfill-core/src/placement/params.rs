//! Plan-derived placement parameters.

use serde::Serialize;

use crate::error::ValidationError;

/// Share of free chunks that receive an event when none is requested.
pub const DEFAULT_PERCENTAGE: f64 = 25.0;
/// Shortest synthetic event (minutes).
pub const DEFAULT_MIN_DURATION_MINUTES: i64 = 30;
/// Longest synthetic event (minutes).
pub const DEFAULT_MAX_DURATION_MINUTES: i64 = 120;

/// How many events to place and how long they may be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementParameters {
    percentage: f64,
    min_duration_minutes: i64,
    max_duration_minutes: i64,
    is_paid_tier: bool,
}

impl PlacementParameters {
    /// Validate and build parameters.
    ///
    /// `percentage` must be finite and within 0-100, durations positive.
    /// A minimum above the maximum is accepted; it just places nothing.
    pub fn new(
        percentage: f64,
        min_duration_minutes: i64,
        max_duration_minutes: i64,
        is_paid_tier: bool,
    ) -> Result<Self, ValidationError> {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(ValidationError::invalid_value(
                "percentage",
                format!("must be a finite number between 0 and 100, got {percentage}"),
            ));
        }
        if min_duration_minutes <= 0 {
            return Err(ValidationError::invalid_value(
                "min_duration_minutes",
                format!("must be positive, got {min_duration_minutes}"),
            ));
        }
        if max_duration_minutes <= 0 {
            return Err(ValidationError::invalid_value(
                "max_duration_minutes",
                format!("must be positive, got {max_duration_minutes}"),
            ));
        }

        Ok(Self {
            percentage,
            min_duration_minutes,
            max_duration_minutes,
            is_paid_tier,
        })
    }

    /// Default durations with the given fill percentage.
    pub fn with_percentage(percentage: f64, is_paid_tier: bool) -> Result<Self, ValidationError> {
        Self::new(
            percentage,
            DEFAULT_MIN_DURATION_MINUTES,
            DEFAULT_MAX_DURATION_MINUTES,
            is_paid_tier,
        )
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn min_duration_minutes(&self) -> i64 {
        self.min_duration_minutes
    }

    pub fn max_duration_minutes(&self) -> i64 {
        self.max_duration_minutes
    }

    pub fn is_paid_tier(&self) -> bool {
        self.is_paid_tier
    }

    /// `floor(chunks * percentage / 100)`
    pub fn event_count(&self, chunk_count: usize) -> usize {
        (chunk_count as f64 * self.percentage / 100.0).floor() as usize
    }
}
