use crate::areas::database::Database;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Name of the repository directory, never part of the working tree
pub const GITLET_DIR_NAME: &str = ".gitlet";

/// Files of the working tree, addressed by `/`-separated names relative to the root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user supplied path into a working tree name
    ///
    /// `./a.txt` and `dir//b.txt` become `a.txt` and `dir/b.txt`; paths that
    /// leave the working tree or point into `.gitlet` are rejected.
    pub fn normalize_name(raw: &str) -> anyhow::Result<String> {
        let mut parts = Vec::new();

        for component in Path::new(raw).components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .with_context(|| format!("file name is not UTF-8: {raw:?}"))?;
                    parts.push(part);
                }
                _ => anyhow::bail!("path is outside the working tree: {raw}"),
            }
        }

        match parts.first() {
            None => anyhow::bail!("not a file name: {raw:?}"),
            Some(&GITLET_DIR_NAME) => anyhow::bail!("path is inside {GITLET_DIR_NAME}: {raw}"),
            Some(_) => Ok(parts.join("/")),
        }
    }

    /// All files of the working tree in name order, excluding `.gitlet`
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        self.collect_files(&self.path)
    }

    /// Files below the directory `name`, in name order
    pub fn list_files_under(&self, name: &str) -> anyhow::Result<Vec<String>> {
        self.collect_files(&self.path.join(name))
    }

    fn collect_files(&self, root: &Path) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != GITLET_DIR_NAME);
        for entry in walker {
            let entry = entry.with_context(|| format!("Unable to list {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = self.relative_name(entry.path()) {
                files.push(name);
            }
        }
        files.sort();

        Ok(files)
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.path).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join("/"))
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn dir_exists(&self, name: &str) -> bool {
        self.path.join(name).is_dir()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);
        if !file_path.is_file() {
            return Err(GitletError::FileNotFound(name.to_string()).into());
        }

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(name)?))
    }

    /// Digest the working copy of `name` would have as a blob, if it exists
    pub fn blob_id(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        if !self.file_exists(name) {
            return Ok(None);
        }

        Ok(Some(self.parse_blob(name)?.object_id()?))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write {}", file_path.display()))
    }

    /// Delete a file and any directories the deletion leaves empty
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);
        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to remove {}", file_path.display()))?;
        }

        self.prune_empty_parent_dirs(&file_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Unable to remove directory {}", parent.display()))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions go first so a file can take the place of a directory they empty,
    // and the other way round.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        migration.check_conflicts()?;

        for action in [ActionType::Delete, ActionType::Modify, ActionType::Add] {
            let Some(changes) = migration.actions().get(&action) else {
                continue;
            };

            for (name, oid) in changes {
                match (action, oid) {
                    (ActionType::Delete, _) => self.remove_file(name)?,
                    (ActionType::Add | ActionType::Modify, Some(oid)) => {
                        let content = database.load_blob(oid)?;
                        self.write_file(name, &content)?;
                    }
                    (_, None) => anyhow::bail!("no blob to write for {name}"),
                }
            }
        }

        Ok(())
    }
}
