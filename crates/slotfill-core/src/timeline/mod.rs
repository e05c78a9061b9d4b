//! Free time discovery.
//!
//! This module provides:
//! - Free interval detection inside weekday working hours
//! - Greedy subdivision into standard-length chunks
//! - The request window that bounds which chunks may receive events

mod chunks;
mod free_slots;
mod window;

pub use chunks::{split_into_chunks, ChunkSplitter};
pub use free_slots::{is_working_day, FreeSlotFinder, WORKDAY_END_HOUR, WORKDAY_START_HOUR};
pub use window::FillWindow;
