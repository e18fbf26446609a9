//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: Create the repository with its root commit
//! - `add`: Stage a file for addition
//! - `commit`: Record the staged changes
//! - `rm`: Stage a file for removal
//! - `log`: History of the current branch, every commit, commits by message
//! - `status`: Branches, staged changes and working tree changes
//! - `checkout`: Restore files or switch branches
//! - `branch`: Create or delete branch pointers
//! - `reset`: Move the current branch and working tree to a commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
