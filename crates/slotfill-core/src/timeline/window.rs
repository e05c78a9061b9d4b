//! Request window applied between chunking and placement.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::interval::Chunk;

/// Only chunks lying fully inside `[start, end]` are eligible for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl FillWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn admits(&self, chunk: &Chunk) -> bool {
        chunk.start().with_timezone(&Utc) >= self.start && chunk.end().with_timezone(&Utc) <= self.end
    }

    /// Drop chunks that stick out of the window, keeping order.
    pub fn retain(&self, chunks: Vec<Chunk>) -> Vec<Chunk> {
        chunks.into_iter().filter(|c| self.admits(c)).collect()
    }
}
