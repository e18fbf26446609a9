//! A small content-addressed version control system
//!
//! - `areas`: the on-disk parts of a repository and the [`Repository`](areas::repository::Repository) handle
//! - `artifacts`: object formats, the index format and the history and merge algorithms
//! - `commands`: the user-level operations, as methods on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
