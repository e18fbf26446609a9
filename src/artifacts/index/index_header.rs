use crate::artifacts::core::errors::GitletError;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn new(entries_count: u32) -> Self {
        IndexHeader { entries_count }
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(SIGNATURE.as_bytes())?;
        bytes.write_u32::<NetworkEndian>(VERSION)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }

    pub fn deserialize(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(GitletError::CorruptIndex("short header".to_string()).into());
        }

        if &bytes[0..4] != SIGNATURE.as_bytes() {
            return Err(GitletError::CorruptIndex("invalid signature".to_string()).into());
        }

        let version = NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(
                GitletError::CorruptIndex(format!("unsupported version {version}")).into(),
            );
        }

        Ok(IndexHeader {
            entries_count: NetworkEndian::read_u32(&bytes[8..12]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_layout_is_signature_version_count() {
        let bytes = IndexHeader::new(3).serialize().unwrap();

        assert_eq!(bytes.as_ref(), b"GIDX\0\0\0\x01\0\0\0\x03");
        assert_eq!(IndexHeader::deserialize(&bytes).unwrap(), IndexHeader::new(3));
    }

    #[test]
    fn foreign_signature_and_version_are_rejected() {
        assert!(IndexHeader::deserialize(b"DIRC\0\0\0\x01\0\0\0\0").is_err());
        assert!(IndexHeader::deserialize(b"GIDX\0\0\0\x02\0\0\0\0").is_err());
        assert!(IndexHeader::deserialize(b"GIDX").is_err());
    }
}
