use crate::artifacts::core::errors::GitletError;
use crate::artifacts::objects::MIN_PREFIX_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store under `.gitlet/objects`
///
/// Objects are zlib-compressed and never rewritten once stored.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object and return its digest
    ///
    /// Storing the same content twice yields the same digest and skips the write.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;

        self.write_object(object_path, object.serialize()?)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Bytes of a stored blob
    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(blob.into_content()),
            ObjectBox::Commit(_) => Err(GitletError::CorruptObject {
                oid: object_id.clone(),
                reason: "expected a blob, found a commit".to_string(),
            }
            .into()),
        }
    }

    /// The commit stored under `object_id`
    ///
    /// Missing objects, objects of another kind and undecodable objects all
    /// report `CommitNotFound`.
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id) {
            Ok(ObjectBox::Commit(commit)) => Ok(*commit),
            Ok(ObjectBox::Blob(_)) => {
                Err(GitletError::CommitNotFound(object_id.to_string()).into())
            }
            Err(error) => match error.downcast_ref::<GitletError>() {
                Some(GitletError::ObjectNotFound(_)) => {
                    Err(GitletError::CommitNotFound(object_id.to_string()).into())
                }
                Some(GitletError::CorruptObject { reason, .. }) => {
                    tracing::warn!(oid = %object_id, reason = %reason, "undecodable commit object");
                    Err(GitletError::CommitNotFound(object_id.to_string()).into())
                }
                _ => Err(error),
            },
        }
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        let parsed = match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader).map(|b| ObjectBox::Blob(b.into())),
            ObjectType::Commit => {
                Commit::deserialize(object_reader).map(|c| ObjectBox::Commit(c.into()))
            }
        };

        parsed.map_err(|error| self.corrupt(object_id, error))
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// Unknown, ambiguous, too short and non-commit ids all fail with `CommitNotFound`.
    pub fn resolve_commit_id(&self, id: &str) -> anyhow::Result<ObjectId> {
        let not_found = || GitletError::CommitNotFound(id.to_string());

        if id.len() < MIN_PREFIX_LENGTH || !ObjectId::is_valid_prefix(id) {
            return Err(not_found().into());
        }

        let candidates = self
            .find_objects_by_prefix(&id.to_ascii_lowercase())?
            .into_iter()
            .filter(|oid| matches!(self.object_type(oid), Ok(ObjectType::Commit)))
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [oid] => Ok(oid.clone()),
            [] => Err(not_found().into()),
            _ => {
                tracing::debug!(prefix = id, matches = candidates.len(), "ambiguous commit id");
                Err(not_found().into())
            }
        }
    }

    /// Every commit in the store, in no particular order
    pub fn list_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut commits = Vec::new();

        for object_id in self.list_objects()? {
            if let ObjectBox::Commit(commit) = self.parse_object(&object_id)? {
                commits.push((object_id, *commit));
            }
        }

        Ok(commits)
    }

    /// Find all objects whose id starts with `prefix`
    ///
    /// For prefixes of two or more characters only one fan-out directory is read.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() < 2 {
            return Ok(self
                .list_objects()?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(prefix))
                .collect());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let mut matches = self.objects_in_dir(dir_name)?;
        matches.retain(|oid| oid.as_ref()[2..].starts_with(file_prefix));

        Ok(matches)
    }

    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut objects = Vec::new();

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to read {}", self.path.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                objects.extend(self.objects_in_dir(&entry.file_name().to_string_lossy())?);
            }
        }
        objects.sort();

        Ok(objects)
    }

    fn objects_in_dir(&self, dir_name: &str) -> anyhow::Result<Vec<ObjectId>> {
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut objects = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            // temp files and strays are not objects
            if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{}", file_name.to_string_lossy()))
            {
                objects.push(oid);
            }
        }

        Ok(objects)
    }

    fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(GitletError::ObjectNotFound(object_id.clone()).into());
        }

        let object_content = self
            .read_object(object_path)
            .map_err(|error| self.corrupt(object_id, error))?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)
            .map_err(|error| self.corrupt(object_id, error))?;

        Ok((object_type, object_reader))
    }

    fn corrupt(&self, object_id: &ObjectId, error: anyhow::Error) -> anyhow::Error {
        GitletError::CorruptObject {
            oid: object_id.clone(),
            reason: format!("{error:#}"),
        }
        .into()
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
