use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::GitletError;

impl Repository {
    /// New branch pointing at the current head; HEAD stays where it is
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name)?;
        let head = self.refs().read_head()?;

        self.refs().create_branch(&branch, &head)
    }

    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name)
            .map_err(|_| GitletError::BranchNotFound(name.to_string()))?;

        self.refs().delete_branch(&branch)?;

        Ok(())
    }
}
