//! Subdivision of free intervals into standard-length chunks.

use chrono::Duration;
use chrono_tz::Tz;

use crate::interval::{Chunk, FreeInterval, StandardDuration, TimeInterval};

/// Greedy splitter: from each interval's start, repeatedly take the
/// largest [`StandardDuration`] that still fits. A tail shorter than 30
/// minutes is dropped.
#[derive(Debug, Clone, Copy)]
pub struct ChunkSplitter {
    tz: Tz,
}

impl ChunkSplitter {
    /// Chunks are expressed in `tz`.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Split every free interval, keeping source order.
    pub fn split(&self, free: &[FreeInterval]) -> Vec<Chunk> {
        free.iter()
            .flat_map(|slot| self.split_interval(slot.interval()))
            .collect()
    }

    /// Split a single interval.
    pub fn split_interval(&self, interval: &TimeInterval) -> Vec<Chunk> {
        let interval = interval.with_timezone(self.tz);
        let mut chunks = Vec::new();
        let mut position = interval.start();

        while let Some(duration) =
            StandardDuration::largest_fitting((interval.end() - position).num_minutes())
        {
            let next = position + Duration::minutes(duration.minutes());
            chunks.push(Chunk::from_interval(TimeInterval::from_ordered(position, next)));
            position = next;
        }

        chunks
    }
}

/// Convenience function to split with an explicit timezone.
pub fn split_into_chunks(free: &[FreeInterval], tz: Tz) -> Vec<Chunk> {
    ChunkSplitter::new(tz).split(free)
}
