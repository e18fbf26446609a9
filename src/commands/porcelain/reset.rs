use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to a commit, checking out all of its files
    pub fn reset(&self, commit_id: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_commit_id(commit_id)?;
        let target = self.database().load_commit(&target_oid)?;

        let mut index = self.load_index()?;
        let (_, head) = self.head_commit()?;

        let migration = Migration::reconcile(target.files(), head.files(), self.workspace())?;
        self.workspace().apply_migration(&migration, self.database())?;

        self.refs().update_head(&target_oid)?;
        index.clear();
        index.save()
    }
}
