use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::{FileChange, Migration};
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::commit::FilesMapping;

impl Repository {
    /// Restore one file from a commit, HEAD when no commit is given
    ///
    /// The file is written whatever the working copy holds; the index is untouched.
    pub fn checkout_file(&self, commit_id: Option<&str>, file: &str) -> anyhow::Result<()> {
        let name = Workspace::normalize_name(file)?;
        let commit_oid = match commit_id {
            Some(commit_id) => self.database().resolve_commit_id(commit_id)?,
            None => self.refs().read_head()?,
        };
        let commit = self.database().load_commit(&commit_oid)?;
        let blob_oid = commit
            .file(&name)
            .cloned()
            .ok_or_else(|| GitletError::FileNotInCommit(name.clone()))?;

        // naming the file counts as tracking it, so only obstacles on disk conflict
        let tracked = FilesMapping::from([(name.clone(), blob_oid.clone())]);
        let migration = Migration::plan_changes(
            [(name.clone(), FileChange::Write(blob_oid))],
            &tracked,
            self.workspace(),
        )?;
        self.workspace().apply_migration(&migration, self.database())?;
        tracing::debug!(%name, commit = %commit_oid, "restored file");

        Ok(())
    }

    /// Switch to another branch, replacing the working tree with its snapshot
    pub fn checkout_branch(&self, target: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(target)
            .map_err(|_| GitletError::BranchNotFound(target.to_string()))?;
        if !self.refs().branch_exists(&branch) {
            return Err(GitletError::BranchNotFound(target.to_string()).into());
        }
        if self.refs().is_current_branch(&branch)? {
            return Err(GitletError::AlreadyOnBranch(target.to_string()).into());
        }

        let mut index = self.load_index()?;
        let (_, head) = self.head_commit()?;
        let target_oid = self.refs().branch_head(&branch)?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let migration = Migration::reconcile(target_commit.files(), head.files(), self.workspace())?;
        self.workspace().apply_migration(&migration, self.database())?;

        self.refs().set_current_branch(&branch)?;
        index.clear();
        index.save()
    }
}
