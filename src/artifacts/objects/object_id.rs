//! Object digests
//!
//! An [`ObjectId`] is the lowercase hex SHA-1 of an object's serialized bytes.
//! On disk an object lives at `objects/<first two hex>/<remaining 38 hex>`.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OID_LENGTH};
use anyhow::Context;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Validate a full 40 character hex digest
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("object id must be {OBJECT_ID_LENGTH} characters, got {}", id.len());
        }
        if !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!("object id contains non-hex characters: {id}");
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Whether `prefix` could abbreviate some object id
    pub fn is_valid_prefix(prefix: &str) -> bool {
        !prefix.is_empty()
            && prefix.len() <= OBJECT_ID_LENGTH
            && prefix.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Write the digest as 20 raw bytes
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let raw = (0..OBJECT_ID_LENGTH)
            .step_by(2)
            .map(|i| u8::from_str_radix(&self.0[i..i + 2], 16))
            .collect::<Result<Vec<u8>, _>>()
            .with_context(|| format!("object id {} is not hex", self.0))?;

        writer.write_all(&raw)?;
        Ok(())
    }

    /// Read a digest stored as 20 raw bytes
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader
            .read_exact(&mut raw)
            .context("truncated object id")?;

        let hex = raw.iter().map(|b| format!("{b:02x}")).collect::<String>();
        Self::try_parse(hex)
    }

    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> &str {
        &self.0[..SHORT_OID_LENGTH]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
