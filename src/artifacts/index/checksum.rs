use crate::artifacts::core::errors::GitletError;
use crate::artifacts::index::CHECKSUM_SIZE;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Reader/writer that hashes every byte passing through it
///
/// The index trailer is the SHA-1 of everything before it.
#[derive(Debug)]
pub struct Checksum<F> {
    file: F,
    digest: Sha1,
}

impl<F> Checksum<F> {
    pub fn new(file: F) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }
}

impl<F: Read> Checksum<F> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file.read_exact(&mut buffer).map_err(|_| {
            GitletError::CorruptIndex("unexpected end of file".to_string())
        })?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected = [0u8; CHECKSUM_SIZE];
        self.file
            .read_exact(&mut expected)
            .map_err(|_| GitletError::CorruptIndex("missing checksum".to_string()))?;

        if expected != self.digest.clone().finalize().as_slice() {
            return Err(GitletError::CorruptIndex(
                "checksum does not match value stored on disk".to_string(),
            )
            .into());
        }

        // trailing bytes after the checksum mean the file was not written by us
        let mut rest = Vec::new();
        self.file.read_to_end(&mut rest)?;
        if !rest.is_empty() {
            return Err(GitletError::CorruptIndex("data after checksum".to_string()).into());
        }

        Ok(())
    }
}

impl<F: Write> Checksum<F> {
    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(mut self) -> anyhow::Result<F> {
        let checksum = self.digest.clone().finalize();
        self.file.write_all(checksum.as_slice())?;
        self.file.flush()?;

        Ok(self.file)
    }
}
