//! Moving the working tree between snapshots

pub mod migration;
