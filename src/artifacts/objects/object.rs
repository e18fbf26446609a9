use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub trait Packable {
    /// Object payload, without the `<type> <size>\0` header
    fn payload(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Parse a payload whose header has already been consumed
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn serialize(&self) -> Result<Bytes> {
        let payload = self.payload()?;

        let mut object_bytes = Vec::with_capacity(payload.len() + 16);
        write!(object_bytes, "{} {}\0", self.object_type(), payload.len())?;
        object_bytes.write_all(&payload)?;

        Ok(Bytes::from(object_bytes))
    }

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let digest = Sha1::digest(&content);

        ObjectId::try_parse(format!("{digest:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

#[derive(Debug, Clone)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Commit(Box<Commit>),
}
