//! Gitlet command implementations
//!
//! Every user-facing command is a method on
//! [`Repository`](crate::areas::repository::Repository), implemented in its own
//! module under `porcelain`.

pub mod porcelain;
