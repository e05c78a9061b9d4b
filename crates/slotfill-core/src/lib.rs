//! # Slotfill Core Library
//!
//! Free-slot discovery and synthetic event generation for populating a
//! calendar with filler events. The library is pure computation over the
//! busy intervals it is handed; calendar providers plug in through the
//! reader/writer traits in [`adapters`].
//!
//! ## Architecture
//!
//! - **Timeline**: Walks weekdays from "now" to a range end and subtracts busy
//!   time from the 08:00-18:00 local working window, then splits the free
//!   time into 120/90/60/30 minute chunks
//! - **Placement**: Picks a percentage of chunks and places one random-length
//!   event in each, titled from an injected pool (paid tiers) or a placeholder
//! - **Plan**: Tier-derived horizon, cooldown and placement parameters
//! - **Config**: TOML defaults for timezone, plan and placement
//!
//! ## Key Components
//!
//! - [`FreeSlotFinder`]: Free interval detection
//! - [`ChunkSplitter`]: Greedy standard-duration subdivision
//! - [`RandomEventPlacer`]: Seedable event placement
//! - [`FillPlanner`]: Reader-to-writer orchestration

pub mod adapters;
pub mod config;
pub mod cooldown;
pub mod engine;
pub mod error;
pub mod interval;
pub mod placement;
pub mod plan;
pub mod timeline;

pub use adapters::{write_all, CalendarReader, CalendarWriter, WriteFailure, WriteReport};
pub use config::Config;
pub use cooldown::CooldownGate;
pub use engine::{
    compute_free_slots, compute_free_slots_at, place_random_events, ComputedFill, FillOutcome,
    FillPlanner, FillRequest,
};
pub use error::{AdapterError, ConfigError, CoreError, Result, ValidationError};
pub use interval::{
    parse_time_zone, sort_by_start, BusyInterval, Chunk, FreeInterval, StandardDuration,
    TimeInterval,
};
pub use placement::{
    EventPool, EventTemplate, PlacementParameters, RandomEventPlacer, SyntheticEvent,
};
pub use plan::PlanTier;
pub use timeline::{split_into_chunks, ChunkSplitter, FillWindow, FreeSlotFinder};
