//! One pending change in the staging index

use crate::artifacts::core::errors::GitletError;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use std::io::{Read, Write};

const ADD_TAG: u8 = 1;
const REMOVE_TAG: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Staged {
    /// Next commit records this blob for the file
    Add(ObjectId),
    /// Next commit drops the file
    Remove,
}

impl Staged {
    pub fn write_entry<W: Write>(&self, name: &str, writer: &mut W) -> anyhow::Result<()> {
        let name_length = u16::try_from(name.len())
            .map_err(|_| anyhow::anyhow!("file name too long for the index: {name}"))?;

        match self {
            Staged::Add(oid) => {
                writer.write_u8(ADD_TAG)?;
                oid.write_raw_to(writer)?;
            }
            Staged::Remove => writer.write_u8(REMOVE_TAG)?,
        }
        writer.write_u16::<NetworkEndian>(name_length)?;
        writer.write_all(name.as_bytes())?;

        Ok(())
    }

    pub fn read_entry<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<(String, Self)> {
        let staged = match reader.read(1)?[0] {
            ADD_TAG => {
                let raw = reader.read(OBJECT_ID_LENGTH / 2)?;
                Staged::Add(ObjectId::read_raw_from(&mut raw.as_ref())?)
            }
            REMOVE_TAG => Staged::Remove,
            tag => {
                return Err(GitletError::CorruptIndex(format!("unknown entry tag {tag}")).into());
            }
        };

        let name_length = NetworkEndian::read_u16(&reader.read(2)?);
        let name = String::from_utf8(reader.read(name_length as usize)?.to_vec())
            .map_err(|_| GitletError::CorruptIndex("file name is not UTF-8".to_string()))?;

        Ok((name, staged))
    }
}
