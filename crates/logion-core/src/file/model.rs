use crate::error::{LogionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A declared media type such as `text/plain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MimeType(String);

impl MimeType {
    /// Parses a `type/subtype` string.
    pub fn from(value: &str) -> Result<Self> {
        let value = value.trim();
        match value.split_once('/') {
            Some((kind, subtype))
                if !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/') =>
            {
                Ok(Self(value.to_ascii_lowercase()))
            }
            _ => Err(LogionError::invalid_input(format!(
                "invalid MIME type '{}'",
                value
            ))),
        }
    }

    pub fn text_plain() -> Self {
        Self("text/plain".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file materialized on the local file system, ready to be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: MimeType,
}

impl FilePayload {
    pub fn new(path: PathBuf, name: impl Into<String>, mime_type: MimeType) -> Self {
        Self {
            path,
            name: name.into(),
            mime_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_parses_type_and_subtype() {
        assert_eq!(MimeType::from("Text/Plain").unwrap(), MimeType::text_plain());
        assert_eq!(MimeType::from("application/json").unwrap().as_str(), "application/json");
    }

    #[test]
    fn test_mime_type_rejects_malformed() {
        assert!(MimeType::from("text").is_err());
        assert!(MimeType::from("/plain").is_err());
        assert!(MimeType::from("text/").is_err());
        assert!(MimeType::from("a/b/c").is_err());
    }
}
