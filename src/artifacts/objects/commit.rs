//! Commit objects
//!
//! A commit is an immutable snapshot: the full mapping of tracked file names
//! to blob digests, plus message, timestamp and parent links.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! parent <oid>              (zero, one or two lines)
//! date <unix-seconds> <+hhmm>
//! file <blob-oid> <name>    (one line per tracked file, in name order)
//!
//! <message, verbatim>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SubsecRound};
use std::collections::BTreeMap;
use std::io::BufRead;

pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Tracked file name to blob digest
pub type FilesMapping = BTreeMap<String, ObjectId>;

/// Parent links of a commit
///
/// Only the root commit has no parent and only merge commits have two.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parents {
    Root,
    Single(ObjectId),
    Merge(ObjectId, ObjectId),
}

impl Parents {
    pub fn first(&self) -> Option<&ObjectId> {
        match self {
            Parents::Root => None,
            Parents::Single(parent) | Parents::Merge(parent, _) => Some(parent),
        }
    }

    pub fn second(&self) -> Option<&ObjectId> {
        match self {
            Parents::Merge(_, parent) => Some(parent),
            _ => None,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Parents::Merge(..))
    }

    /// First parent, then second parent
    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.first().into_iter().chain(self.second())
    }
}

impl TryFrom<Vec<ObjectId>> for Parents {
    type Error = anyhow::Error;

    fn try_from(mut parents: Vec<ObjectId>) -> anyhow::Result<Self> {
        match parents.len() {
            0 => Ok(Parents::Root),
            1 => Ok(Parents::Single(parents.remove(0))),
            2 => {
                let second = parents.remove(1);
                Ok(Parents::Merge(parents.remove(0), second))
            }
            n => anyhow::bail!("a commit has at most two parents, found {n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    parents: Parents,
    files: FilesMapping,
}

impl Commit {
    /// The commit every repository starts from
    pub fn root() -> Self {
        Commit {
            message: ROOT_COMMIT_MESSAGE.to_string(),
            timestamp: DateTime::UNIX_EPOCH.fixed_offset(),
            parents: Parents::Root,
            files: FilesMapping::new(),
        }
    }

    /// A commit on top of `parent`, or a merge commit when `second_parent` is given
    ///
    /// The mapping is copied so later edits by the caller cannot reach history.
    /// The timestamp is truncated to whole seconds, the precision commits store.
    pub fn child(
        message: String,
        parent: ObjectId,
        second_parent: Option<ObjectId>,
        files: &FilesMapping,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        let parents = match second_parent {
            Some(second_parent) => Parents::Merge(parent, second_parent),
            None => Parents::Single(parent),
        };

        Commit {
            message,
            timestamp: timestamp.trunc_subsecs(0),
            parents,
            files: files.clone(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Timestamp as shown by `log`, e.g. `Thu Jan 1 00:00:00 1970 +0000`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn files(&self) -> &FilesMapping {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, offset) = value
            .split_once(' ')
            .context("Invalid commit object: date needs seconds and offset")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: date seconds")?;

        let utc = DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: date out of range")?;
        let offset = Self::parse_offset(offset)
            .with_context(|| format!("Invalid commit object: date offset {offset:?}"))?;

        Ok(utc.with_timezone(&offset))
    }

    /// `+hhmm` / `-hhmm` as written by `%z`
    fn parse_offset(value: &str) -> Option<FixedOffset> {
        let (sign, digits) = match value.split_at_checked(1)? {
            ("+", digits) => (1, digits),
            ("-", digits) => (-1, digits),
            _ => return None,
        };
        if digits.len() != 4 {
            return None;
        }

        let hours = digits[..2].parse::<i32>().ok()?;
        let minutes = digits[2..].parse::<i32>().ok()?;
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }
}

impl Packable for Commit {
    fn payload(&self) -> anyhow::Result<Bytes> {
        let mut lines = Vec::new();

        for parent in self.parents.iter() {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, oid) in &self.files {
            if name.contains('\n') {
                anyhow::bail!("file name {name:?} contains a newline");
            }
            lines.push(format!("file {oid} {name}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: not UTF-8")?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut files = FilesMapping::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "date" => timestamp = Some(Self::parse_timestamp(value)?),
                "file" => {
                    let (oid, name) = value
                        .split_once(' ')
                        .with_context(|| format!("Invalid commit object: file line {line:?}"))?;
                    files.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                other => anyhow::bail!("Invalid commit object: unknown header '{other}'"),
            }
        }

        Ok(Commit {
            message: message.to_string(),
            timestamp: timestamp.context("Invalid commit object: missing date line")?,
            parents: Parents::try_from(parents)?,
            files,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
