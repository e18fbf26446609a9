//! Repository areas
//!
//! - `database`: content-addressed store for blobs and commits
//! - `index`: staging area for the next commit
//! - `refs`: branch pointers and HEAD
//! - `repository`: handle tying the areas together
//! - `workspace`: files of the working tree

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
