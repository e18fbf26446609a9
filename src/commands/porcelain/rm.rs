use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::errors::GitletError;

impl Repository {
    /// Unstage a pending addition, and stop tracking a committed file
    ///
    /// A tracked file is also deleted from the working tree.
    pub fn rm(&self, file: &str) -> anyhow::Result<()> {
        let name = Workspace::normalize_name(file)?;
        let mut index = self.load_index()?;
        let (_, head) = self.head_commit()?;

        let staged = index.is_staged_for_add(&name);
        let tracked = head.tracks(&name);
        if !staged && !tracked {
            return Err(GitletError::NoReasonToRemove(name).into());
        }

        if staged {
            index.unstage(&name);
        }
        if tracked {
            index.stage_remove(&name);
            self.workspace().remove_file(&name)?;
        }

        index.save()
    }
}
