use bytes::Bytes;

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

/// Both versions of a conflicting file between conflict markers
///
/// A side that deleted the file contributes nothing. The versions are
/// concatenated verbatim, so content without a trailing newline runs into
/// the following marker.
pub fn conflict_content(current: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let other = other.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + other.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(other);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    Bytes::from(content)
}
