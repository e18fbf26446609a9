//! Repository error types
//!
//! Every condition a command can refuse on is a variant of [`GitletError`].
//! Functions keep returning `anyhow::Result`; a typed error travels inside the
//! `anyhow::Error` and can be recovered with `downcast_ref::<GitletError>()`.
//!
//! The `Display` text of each variant is the message printed to the user.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitletError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    /// no stored object has this digest
    #[error("No object with id {0} exists.")]
    ObjectNotFound(ObjectId),

    /// the id is unknown, ambiguous, or names something other than a commit
    #[error("No commit with that id exists.")]
    CommitNotFound(String),

    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    #[error("Cannot remove the current branch.")]
    CannotDeleteCurrentBranch(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("No changes added to the commit.")]
    NoChangesStaged,

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("File does not exist.")]
    FileNotFound(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(Vec<String>),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("Given branch is an ancestor of the current branch.")]
    NothingToMerge,

    #[error("No reason to remove the file.")]
    NoReasonToRemove(String),

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("corrupt index: {0}")]
    CorruptIndex(String),
}

impl GitletError {
    /// Whether the error reports a missing object, commit, branch or file
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GitletError::ObjectNotFound(_)
                | GitletError::CommitNotFound(_)
                | GitletError::BranchNotFound(_)
                | GitletError::FileNotFound(_)
                | GitletError::FileNotInCommit(_)
        )
    }
}

/// Extract the typed error carried by an `anyhow::Error`, if any
pub fn as_gitlet_error(error: &anyhow::Error) -> Option<&GitletError> {
    error.downcast_ref::<GitletError>()
}
