//! Staging index
//!
//! The index holds the changes the next commit will record on top of HEAD:
//! files staged for addition (with the blob to record) and files staged for
//! removal. It is loaded whole at the start of a command and saved whole at
//! the end; see [`crate::artifacts::index`] for the byte format.

use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::staged::Staged;
use crate::artifacts::objects::commit::FilesMapping;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use std::collections::BTreeMap;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.gitlet/index`)
    path: Box<Path>,
    entries: BTreeMap<String, Staged>,
    /// Modified since loading
    changed: bool,
}

impl Index {
    /// An empty index that will be saved to `path`
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    /// Read the index file; a missing or empty file is an empty index
    ///
    /// Acquires a shared lock on the index file while reading.
    pub fn load(path: Box<Path>) -> anyhow::Result<Self> {
        let mut index = Index::new(path);
        if !index.path.exists() {
            return Ok(index);
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&index.path)
            .with_context(|| format!("Unable to open index {}", index.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(index);
        }

        let mut reader = Checksum::new(lock.deref_mut());
        let header = IndexHeader::deserialize(&reader.read(HEADER_SIZE)?)?;
        for _ in 0..header.entries_count {
            let (name, staged) = Staged::read_entry(&mut reader)?;
            index.entries.insert(name, staged);
        }
        reader.verify()?;

        Ok(index)
    }

    /// Replace the index file with the current entries
    ///
    /// The new content goes to a locked temp file which is then renamed over
    /// the index, so readers never observe a half-written index.
    pub fn save(&mut self) -> anyhow::Result<()> {
        let index_dir = self
            .path
            .parent()
            .with_context(|| format!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("index-{}.tmp", rand::random::<u32>()));

        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to create {}", temp_path.display()))?;
        {
            let mut lock = file_guard::lock(&mut temp_file, file_guard::Lock::Exclusive, 0, 1)?;
            let mut writer = Checksum::new(lock.deref_mut());

            let entries_count = u32::try_from(self.entries.len())
                .context("too many entries for the index")?;
            writer.write(&IndexHeader::new(entries_count).serialize()?)?;

            for (name, staged) in &self.entries {
                let mut entry = Vec::new();
                staged.write_entry(name, &mut entry)?;
                writer.write(&entry)?;
            }

            writer.write_checksum()?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace index {}", self.path.display()))?;
        self.changed = false;
        tracing::debug!(entries = self.entries.len(), "index saved");

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn stage_add(&mut self, name: &str, oid: ObjectId) {
        self.entries.insert(name.to_string(), Staged::Add(oid));
        self.changed = true;
    }

    pub fn stage_remove(&mut self, name: &str) {
        self.entries.insert(name.to_string(), Staged::Remove);
        self.changed = true;
    }

    /// Drop any pending change for `name`; returns whether one existed
    pub fn unstage(&mut self, name: &str) -> bool {
        let removed = self.entries.remove(name).is_some();
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.changed = true;
        }
    }

    pub fn get(&self, name: &str) -> Option<&Staged> {
        self.entries.get(name)
    }

    pub fn is_staged_for_add(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Staged::Add(_)))
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Staged::Remove))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Staged)> {
        self.entries.iter()
    }

    /// Names staged for addition with their blobs, in name order
    pub fn additions(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter().filter_map(|(name, staged)| match staged {
            Staged::Add(oid) => Some((name, oid)),
            Staged::Remove => None,
        })
    }

    /// Names staged for removal, in name order
    pub fn removals(&self) -> impl Iterator<Item = &String> {
        self.entries
            .iter()
            .filter(|(_, staged)| **staged == Staged::Remove)
            .map(|(name, _)| name)
    }

    /// The snapshot a commit on top of `base` would record
    pub fn apply_to(&self, base: &FilesMapping) -> FilesMapping {
        let mut files = base.clone();

        for (name, staged) in &self.entries {
            match staged {
                Staged::Add(oid) => files.insert(name.clone(), oid.clone()),
                Staged::Remove => files.remove(name),
            };
        }

        files
    }
}
