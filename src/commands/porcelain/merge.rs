use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::{FileChange, Migration};
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::resolution::Resolution;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Three-way merge of branch `target` into the current branch
    ///
    /// Either the current branch is fast-forwarded, or a merge commit with
    /// parents (current, target) is recorded. Conflicting files are written
    /// with markers and committed as they are.
    pub fn merge(&self, target: &str) -> anyhow::Result<()> {
        let mut index = self.load_index()?;
        if !index.is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let other_branch = BranchName::try_parse(target)
            .map_err(|_| GitletError::BranchNotFound(target.to_string()))?;
        if !self.refs().branch_exists(&other_branch) {
            return Err(GitletError::BranchNotFound(target.to_string()).into());
        }
        let current_branch = self.refs().current_branch()?;
        if current_branch == other_branch {
            return Err(GitletError::SelfMerge.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let other_oid = self.refs().branch_head(&other_branch)?;
        let history = self.history();
        if history.is_ancestor(&other_oid, &head_oid)? {
            return Err(GitletError::NothingToMerge.into());
        }

        let split_oid = history.split_point(&head_oid, &other_oid)?;
        let other = self.database().load_commit(&other_oid)?;

        if split_oid == head_oid {
            let migration = Migration::reconcile(other.files(), head.files(), self.workspace())?;
            self.workspace().apply_migration(&migration, self.database())?;
            self.refs().update_head(&other_oid)?;
            index.clear();
            index.save()?;

            tracing::info!(branch = %current_branch, to = %other_oid, "fast-forwarded");
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let plan = Resolution::plan(split.files(), head.files(), other.files());

        let mut changes = Vec::with_capacity(plan.len());
        let mut has_conflict = false;
        for (name, resolution) in &plan {
            let change = match resolution {
                Resolution::KeepCurrent => continue,
                Resolution::TakeOther(oid) => FileChange::Write(oid.clone()),
                Resolution::Remove => FileChange::Delete,
                Resolution::Conflict { current, other } => {
                    has_conflict = true;
                    FileChange::Write(self.store_conflict(current.as_ref(), other.as_ref())?)
                }
            };
            changes.push((name.clone(), change));
        }

        let migration = Migration::plan_changes(changes, head.files(), self.workspace())?;
        self.workspace().apply_migration(&migration, self.database())?;

        for (name, resolution) in &plan {
            match resolution {
                Resolution::KeepCurrent => {}
                Resolution::Remove => index.stage_remove(name),
                _ => self.stage_file(&mut index, head.files(), name)?,
            }
        }

        let files = index.apply_to(head.files());
        let message = format!("Merged {other_branch} into {current_branch}.");
        self.write_commit(message, head_oid, Some(other_oid), &files)?;
        index.clear();
        index.save()?;

        if has_conflict {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn store_conflict(
        &self,
        current: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let current = current.map(|oid| self.database().load_blob(oid)).transpose()?;
        let other = other.map(|oid| self.database().load_blob(oid)).transpose()?;

        let blob = Blob::new(conflict_content(current.as_deref(), other.as_deref()));

        self.database().store(&blob)
    }
}
