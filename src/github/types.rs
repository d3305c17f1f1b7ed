//! Wire types for the GitHub contents API.

use serde::{Deserialize, Serialize};

use crate::github::error::GithubError;

/// One entry from a contents listing or a single-path get.
/// For files fetched individually, `content` carries base64 with embedded
/// newlines; listings omit it.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.entry_type == "file"
    }

    /// Decode the base64 content of a file entry.
    pub fn decoded_content(&self) -> Result<Vec<u8>, GithubError> {
        use base64::Engine;
        let raw = self.content.as_deref().ok_or_else(|| GithubError::Parse(format!("no content for {}", self.path)))?;
        // The API wraps base64 at 60 columns
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| GithubError::Parse(format!("bad base64 for {}: {}", self.path, e)))
    }
}

/// Request body for create/update (PUT /contents/{path}).
/// `sha` is present only for updates.
#[derive(Debug, Serialize)]
pub struct WriteRequest<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

/// Request body for delete (DELETE /contents/{path}).
#[derive(Debug, Serialize)]
pub struct DeleteRequest<'a> {
    pub message: &'a str,
    pub sha: &'a str,
    pub branch: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_content_strips_wrapping_newlines() {
        let entry = ContentEntry {
            path: "hello.txt".into(),
            sha: "abc".into(),
            entry_type: "file".into(),
            // "hello world" base64, wrapped mid-stream like the API does
            content: Some("aGVsbG8g\nd29ybGQ=\n".into()),
        };
        assert_eq!(entry.decoded_content().unwrap(), b"hello world");
    }

    #[test]
    fn decoded_content_without_content_is_parse_error() {
        let entry = ContentEntry { path: "dir".into(), sha: "abc".into(), entry_type: "dir".into(), content: None };
        assert!(matches!(entry.decoded_content(), Err(GithubError::Parse(_))));
    }

    #[test]
    fn listing_entry_deserializes_without_content() {
        let json = r#"{"path":"src","sha":"deadbeef","type":"dir"}"#;
        let entry: ContentEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_file());
        assert!(entry.content.is_none());
    }
}
