//! Random placement of synthetic events into free chunks.

use chrono::Duration;
use chrono_tz::Tz;
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use tracing::{debug, trace};

use super::event::SyntheticEvent;
use super::params::PlacementParameters;
use super::pool::{EventPool, EventTemplate};
use crate::interval::Chunk;

/// Picks a share of the chunks and drops one event of random length at a
/// random offset into each.
///
/// All randomness comes from the `Rng` passed in, so a seeded generator
/// makes the whole placement reproducible.
#[derive(Debug, Clone, Default)]
pub struct RandomEventPlacer {
    pool: EventPool,
}

impl RandomEventPlacer {
    pub fn new(pool: EventPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &EventPool {
        &self.pool
    }

    /// Place events with the given random source.
    ///
    /// Events are expressed in `tz` whatever zone the chunks carry. Chunks
    /// too short for the minimum duration are skipped, so the result may
    /// hold fewer events than were selected. Never fails.
    pub fn place<R: Rng + ?Sized>(
        &self,
        chunks: &[Chunk],
        params: &PlacementParameters,
        tz: Tz,
        rng: &mut R,
    ) -> Vec<SyntheticEvent> {
        let count = params.event_count(chunks.len());
        if count == 0 {
            debug!(chunks = chunks.len(), percentage = params.percentage(), "no events to place");
            return Vec::new();
        }

        let mut events = Vec::with_capacity(count);
        for index in sample_indices(rng, chunks.len(), count) {
            match self.place_in_chunk(&chunks[index], params, tz, rng) {
                Some(event) => events.push(event),
                None => trace!(index, "chunk too short for minimum duration"),
            }
        }

        debug!(selected = count, placed = events.len(), "placed synthetic events");
        events
    }

    /// Place events with a PCG generator seeded from `seed`, or from OS
    /// entropy when `None`.
    pub fn place_seeded(
        &self,
        chunks: &[Chunk],
        params: &PlacementParameters,
        tz: Tz,
        seed: Option<u64>,
    ) -> Vec<SyntheticEvent> {
        let mut rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        self.place(chunks, params, tz, &mut rng)
    }

    fn place_in_chunk<R: Rng + ?Sized>(
        &self,
        chunk: &Chunk,
        params: &PlacementParameters,
        tz: Tz,
        rng: &mut R,
    ) -> Option<SyntheticEvent> {
        let available = chunk.duration_minutes();
        let actual_max = params.max_duration_minutes().min(available);
        if actual_max < params.min_duration_minutes() {
            return None;
        }

        let duration = rng.gen_range(params.min_duration_minutes()..=actual_max);
        let slack = available - duration;
        let offset = if slack > 0 { rng.gen_range(0..slack) } else { 0 };

        let start = chunk.start().with_timezone(&tz) + Duration::minutes(offset);
        let end = start + Duration::minutes(duration);

        let template = if params.is_paid_tier() {
            self.pool
                .choose(rng)
                .cloned()
                .unwrap_or_else(EventTemplate::placeholder)
        } else {
            EventTemplate::placeholder()
        };

        Some(SyntheticEvent {
            title: template.title,
            description: template.description,
            start,
            end,
        })
    }
}

/// Draw `count` distinct indices from `0..len`, uniformly, by a partial
/// Fisher-Yates shuffle. Order is the draw order.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, count: usize) -> Vec<usize> {
    let count = count.min(len);
    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..count {
        let j = rng.gen_range(i..len);
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices
}
