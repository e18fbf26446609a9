use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header, leaving the reader at the payload
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;

        let object_type = String::from_utf8(object_type)?;
        let object_type = ObjectType::try_from(object_type.trim_end())?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            anyhow::bail!("object header is not terminated");
        }

        Ok(object_type)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            other => Err(anyhow::anyhow!("unknown object type '{other}'")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn header_is_consumed_up_to_payload() {
        let mut reader = Cursor::new(b"commit 5\0hello".to_vec());

        let object_type = ObjectType::parse_object_type(&mut reader).unwrap();
        let mut payload = String::new();
        reader.read_to_string(&mut payload).unwrap();

        assert_eq!(object_type, ObjectType::Commit);
        assert_eq!(payload, "hello");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut reader = Cursor::new(b"tree 0\0".to_vec());

        assert!(ObjectType::parse_object_type(&mut reader).is_err());
    }
}
