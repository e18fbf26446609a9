//! Working tree status
//!
//! - `file_change`: how a working file differs from what would be committed
//! - `status_info`: the five status sections computed from HEAD, index and disk

pub mod file_change;
pub mod status_info;
