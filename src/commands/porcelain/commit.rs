use crate::areas::repository::Repository;
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::commit::{Commit, FilesMapping};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            return Err(GitletError::EmptyCommitMessage.into());
        }

        let mut index = self.load_index()?;
        if index.is_empty() {
            return Err(GitletError::NoChangesStaged.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let files = index.apply_to(head.files());

        self.write_commit(message.to_string(), head_oid, None, &files)?;

        index.clear();
        index.save()
    }

    /// Store a commit on top of HEAD and advance the current branch to it
    pub(crate) fn write_commit(
        &self,
        message: String,
        parent: ObjectId,
        second_parent: Option<ObjectId>,
        files: &FilesMapping,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::child(
            message,
            parent,
            second_parent,
            files,
            self.config().commit_timestamp(),
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;
        tracing::info!(oid = %commit_id, files = files.len(), "committed");

        Ok(commit_id)
    }
}
