use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::staged::Staged;
use crate::artifacts::objects::commit::FilesMapping;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub fn add(&self, file: &str) -> anyhow::Result<()> {
        let name = Workspace::normalize_name(file)?;
        let mut index = self.load_index()?;
        let (_, head) = self.head_commit()?;

        self.stage_file(&mut index, head.files(), &name)?;

        if index.is_changed() {
            index.save()?;
        }

        Ok(())
    }

    /// Stage the working copy of `name` against the `head` snapshot
    ///
    /// Content identical to `head` only clears a pending change; otherwise the
    /// blob is stored and staged, unless exactly that blob is staged already.
    pub(crate) fn stage_file(
        &self,
        index: &mut Index,
        head: &FilesMapping,
        name: &str,
    ) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(name)?;
        let oid = blob.object_id()?;

        if head.get(name) == Some(&oid) {
            if index.unstage(name) {
                tracing::debug!(name, "content matches HEAD, unstaged");
            }
            return Ok(());
        }

        if index.get(name) != Some(&Staged::Add(oid.clone())) {
            self.database().store(&blob)?;
            index.stage_add(name, oid);
        }

        Ok(())
    }
}
