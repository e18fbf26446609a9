#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fixed timestamp used for every commit made through the helpers
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";
