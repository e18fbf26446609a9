//! Branch pointers and HEAD
//!
//! ## File Format
//!
//! - `refs/heads/<branch>`: the 40 character digest of the branch tip
//! - `HEAD`: `ref: refs/heads/<branch>`, naming the current branch
//!
//! HEAD is always symbolic; a detached HEAD cannot be expressed.

use crate::artifacts::branch::HEADS_PREFIX;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.gitlet` directory
    path: Box<Path>,
}

impl Refs {
    /// Branch named by HEAD
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref = regex::Regex::new(SYMREF_REGEX)?;
        let target = symref
            .captures(content.trim())
            .map(|captures| captures[1].to_string())
            .with_context(|| format!("HEAD is not a symbolic ref: {:?}", content.trim()))?;
        let name = target
            .strip_prefix(HEADS_PREFIX)
            .with_context(|| format!("HEAD points outside {HEADS_PREFIX}: {target}"))?;

        BranchName::try_parse(name)
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), &branch_name.to_symref())?;
        tracing::debug!(branch = %branch_name, "HEAD moved");

        Ok(())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Tip of the current branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        self.branch_head(&self.current_branch()?)
    }

    /// Move the current branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.set_branch_head(&self.current_branch()?, oid)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn branch_head(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Err(GitletError::BranchNotFound(branch_name.to_string()).into());
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("ref file at {:?} does not hold a digest", branch_path))
    }

    pub fn set_branch_head(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(branch_name), oid.as_ref())?;
        tracing::debug!(branch = %branch_name, %oid, "branch updated");

        Ok(())
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(GitletError::BranchAlreadyExists(branch_name.to_string()).into());
        }

        self.set_branch_head(branch_name, oid)
    }

    /// Remove a branch pointer; the commits it pointed to are kept
    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.is_current_branch(branch_name)? {
            return Err(GitletError::CannotDeleteCurrentBranch(branch_name.to_string()).into());
        }

        let oid = self.branch_head(branch_name)?;
        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %branch_name, %oid, "branch deleted");

        Ok(oid)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("failed to create parent directories for ref file at {:?}", path)
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.path.join(branch_name.as_ref_path()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join(HEADS_PREFIX).into_boxed_path()
    }
}
