use crate::areas::index::Index;
use crate::artifacts::index::staged::Staged;
use crate::artifacts::objects::commit::FilesMapping;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Everything `status` reports except the branch list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

impl StatusInfo {
    /// Compare HEAD's snapshot, the index and the working tree digests
    ///
    /// `working` maps every file on disk to the digest its content would have.
    pub fn compute(head: &FilesMapping, index: &Index, working: &FilesMapping) -> Self {
        let mut status = StatusInfo::default();

        for (name, staged) in index.entries() {
            match staged {
                Staged::Add(oid) => {
                    status.staged_files.insert(name.clone());
                    if let Some(change) = Self::compare(oid, working.get(name)) {
                        status.workspace_changeset.insert(name.clone(), change);
                    }
                }
                Staged::Remove => {
                    status.removed_files.insert(name.clone());
                }
            }
        }

        for (name, oid) in head {
            if index.get(name).is_some() {
                continue;
            }
            if let Some(change) = Self::compare(oid, working.get(name)) {
                status.workspace_changeset.insert(name.clone(), change);
            }
        }

        // a file staged for removal but present again on disk is untracked
        status.untracked_files = working
            .keys()
            .filter(|name| {
                !index.is_staged_for_add(name)
                    && (!head.contains_key(*name) || index.is_staged_for_removal(name))
            })
            .cloned()
            .collect();

        status
    }

    fn compare(expected: &ObjectId, actual: Option<&ObjectId>) -> Option<WorkspaceChangeType> {
        match actual {
            None => Some(WorkspaceChangeType::Deleted),
            Some(actual) if actual != expected => Some(WorkspaceChangeType::Modified),
            Some(_) => None,
        }
    }
}
