//! Working tree migration
//!
//! A [`Migration`] is the complete list of file writes and deletions needed to
//! move the working tree to a new state. It is planned up front, checked for
//! untracked files that would be clobbered, and only then applied by
//! [`Workspace::apply_migration`](crate::areas::workspace::Workspace::apply_migration).
//! A conflict anywhere means nothing at all is touched.

use crate::areas::workspace::Workspace;
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::commit::FilesMapping;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Type of file system action required to reach the target state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create a file that is not tracked yet
    Add,
    /// Delete a tracked file
    Delete,
    /// Overwrite a tracked file
    Modify,
}

/// Desired end state of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Write(ObjectId),
    Delete,
}

/// Planned actions grouped by type, each list in name order
pub type ActionsSet = HashMap<ActionType, Vec<(String, Option<ObjectId>)>>;

#[derive(Debug, Clone)]
pub struct Migration {
    actions: ActionsSet,
    /// Untracked paths the migration would overwrite
    conflicts: BTreeSet<String>,
}

impl Migration {
    /// Plan the move from the `current` snapshot to the `target` snapshot
    ///
    /// Files of `target` are written, files only in `current` are deleted.
    /// Besides the checks of [`Migration::plan_changes`], an untracked working
    /// file that `target` does not hold either is a conflict: after the move it
    /// would sit in a tree that never recorded it.
    pub fn reconcile(
        target: &FilesMapping,
        current: &FilesMapping,
        workspace: &Workspace,
    ) -> anyhow::Result<Self> {
        let writes = target
            .iter()
            .map(|(name, oid)| (name.clone(), FileChange::Write(oid.clone())));
        let deletions = current
            .keys()
            .filter(|name| !target.contains_key(*name))
            .map(|name| (name.clone(), FileChange::Delete));

        let mut migration = Self::plan_changes(writes.chain(deletions), current, workspace)?;

        for name in workspace.list_files()? {
            if !current.contains_key(&name) && !target.contains_key(&name) {
                migration.conflicts.insert(name);
            }
        }

        Ok(migration)
    }

    /// Plan arbitrary per-file changes against the `tracked` snapshot
    ///
    /// Writing a name absent from `tracked` over a differing working copy is an
    /// untracked-file conflict; so is a directory or untracked file standing
    /// where the write needs a file or a parent directory.
    pub fn plan_changes(
        changes: impl IntoIterator<Item = (String, FileChange)>,
        tracked: &FilesMapping,
        workspace: &Workspace,
    ) -> anyhow::Result<Self> {
        let changes = changes.into_iter().collect::<BTreeMap<_, _>>();
        let mut migration = Migration {
            actions: HashMap::from([
                (ActionType::Add, Vec::new()),
                (ActionType::Delete, Vec::new()),
                (ActionType::Modify, Vec::new()),
            ]),
            conflicts: BTreeSet::new(),
        };

        for (name, change) in &changes {
            match change {
                FileChange::Delete => {
                    if workspace.file_exists(name) {
                        migration.record(ActionType::Delete, name, None);
                    }
                }
                FileChange::Write(oid) => {
                    migration.check_for_conflict(name, oid, tracked, &changes, workspace)?;

                    if workspace.blob_id(name)?.as_ref() == Some(oid) {
                        continue;
                    }
                    let action = if tracked.contains_key(name) {
                        ActionType::Modify
                    } else {
                        ActionType::Add
                    };
                    migration.record(action, name, Some(oid.clone()));
                }
            }
        }

        tracing::debug!(
            added = migration.actions[&ActionType::Add].len(),
            modified = migration.actions[&ActionType::Modify].len(),
            deleted = migration.actions[&ActionType::Delete].len(),
            conflicts = migration.conflicts.len(),
            "planned migration"
        );

        Ok(migration)
    }

    fn check_for_conflict(
        &mut self,
        name: &str,
        oid: &ObjectId,
        tracked: &FilesMapping,
        changes: &BTreeMap<String, FileChange>,
        workspace: &Workspace,
    ) -> anyhow::Result<()> {
        // a directory in the way must hold nothing but files this migration deletes
        if workspace.dir_exists(name) {
            let blocked = workspace
                .list_files_under(name)?
                .into_iter()
                .any(|file| !matches!(changes.get(&file), Some(FileChange::Delete)));
            if blocked {
                self.conflicts.insert(name.to_string());
            }
            return Ok(());
        }

        if !tracked.contains_key(name)
            && let Some(working_oid) = workspace.blob_id(name)?
            && &working_oid != oid
        {
            self.conflicts.insert(name.to_string());
        }

        // a file where the write needs a directory must be going away
        for parent in Path::new(name).ancestors().skip(1) {
            let Some(parent) = parent.to_str().filter(|p| !p.is_empty()) else {
                continue;
            };
            let removed = matches!(changes.get(parent), Some(FileChange::Delete));
            if workspace.file_exists(parent) && !removed {
                self.conflicts.insert(parent.to_string());
            }
        }

        Ok(())
    }

    fn record(&mut self, action: ActionType, name: &str, oid: Option<ObjectId>) {
        self.actions
            .entry(action)
            .or_default()
            .push((name.to_string(), oid));
    }

    /// Fail with `UntrackedFileConflict` if applying would clobber anything
    pub fn check_conflicts(&self) -> anyhow::Result<()> {
        if self.conflicts.is_empty() {
            Ok(())
        } else {
            Err(GitletError::UntrackedFileConflict(self.conflicts.iter().cloned().collect()).into())
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn conflicts(&self) -> &BTreeSet<String> {
        &self.conflicts
    }

    pub fn is_empty(&self) -> bool {
        self.actions.values().all(Vec::is_empty)
    }
}
