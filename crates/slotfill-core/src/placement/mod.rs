//! Synthetic event generation.
//!
//! Selects a percentage of free chunks and stamps a random-length event
//! with a pooled or placeholder title into each.

mod event;
mod params;
mod placer;
mod pool;

pub use event::SyntheticEvent;
pub use params::{
    PlacementParameters, DEFAULT_MAX_DURATION_MINUTES, DEFAULT_MIN_DURATION_MINUTES,
    DEFAULT_PERCENTAGE,
};
pub use placer::{sample_indices, RandomEventPlacer};
pub use pool::{EventPool, EventTemplate, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE};
