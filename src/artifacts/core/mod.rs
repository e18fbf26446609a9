//! Core utilities and shared types
//!
//! - `errors`: the typed failure kinds every command can surface
//! - `config`: settings read from the process environment

pub mod config;
pub mod errors;
