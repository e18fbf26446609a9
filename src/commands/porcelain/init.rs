use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let root = self.database().store(&Commit::root())?;
        let master = BranchName::default_branch();
        self.refs()
            .set_branch_head(&master, &root)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&master)
            .context("Failed to create initial HEAD reference")?;

        self.load_index()?.save()?;
        tracing::info!(root = %root, "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty Gitlet repository in {}",
            self.gitlet_path().display()
        )?;

        Ok(())
    }
}
