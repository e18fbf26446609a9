//! Data structures and algorithms behind the commands
//!
//! - `branch`: branch names
//! - `checkout`: planning working tree migrations
//! - `core`: errors and configuration
//! - `index`: the staging index byte format
//! - `log`: history walks and commit formatting
//! - `merge`: split points, per-file resolution and conflict content
//! - `objects`: blobs, commits and object ids
//! - `status`: working tree status

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
