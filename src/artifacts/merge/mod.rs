//! Three-way merge building blocks
//!
//! - `split_point`: history graph queries (ancestors, first-parent ancestry,
//!   the split point used as merge base)
//! - `resolution`: per-file merge policy over split, current and other snapshots
//! - `conflict`: content written for files changed differently on both sides

pub mod conflict;
pub mod resolution;
pub mod split_point;
