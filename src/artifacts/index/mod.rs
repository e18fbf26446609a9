//! Staging index file format
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "GIDX" (4 bytes)
//!   - Version: 1 (4 bytes, big endian)
//!   - Entry count (4 bytes, big endian)
//!
//! Entries, in name order:
//!   - Tag: 1 = staged for addition, 2 = staged for removal (1 byte)
//!   - Blob digest, additions only (20 bytes)
//!   - Name length (2 bytes, big endian) followed by the UTF-8 name
//!
//! Checksum (20 bytes):
//!   - SHA-1 of all preceding bytes
//! ```

pub mod checksum;
pub mod index_header;
pub mod staged;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// 4 bytes for the signature, 4 for the version, 4 for the entry count
pub const HEADER_SIZE: usize = 12;

pub const SIGNATURE: &str = "GIDX";

pub const VERSION: u32 = 1;
