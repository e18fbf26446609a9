//! Gitlet object types
//!
//! Two kinds of object share one content-addressed namespace:
//!
//! - **Blob**: the bytes of one file version
//! - **Commit**: a snapshot (file name to blob digest) with message, timestamp
//!   and parent links
//!
//! Both serialize as `<type> <size>\0<payload>` and are identified by the
//! SHA-1 of that serialization.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 digest in hexadecimal
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated digest shown for merge parents
pub const SHORT_OID_LENGTH: usize = 7;

/// Shortest prefix accepted when resolving an abbreviated commit id
pub const MIN_PREFIX_LENGTH: usize = 4;
