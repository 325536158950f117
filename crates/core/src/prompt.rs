//! System prompt templates.
use std::path::Path;

use tracing::debug;

use crate::error::ChatError;

/// Reads a prompt template verbatim.
///
/// The content is returned untouched; a missing or unreadable file is a
/// [`ChatError::NotFound`] so the caller can decide how to degrade.
pub fn read_prompt(path: &Path) -> Result<String, ChatError> {
    let content = std::fs::read_to_string(path).map_err(|source| ChatError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = content.len(), "Loaded system prompt");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_read_prompt_exact_content() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Hello").unwrap();

        let content = read_prompt(file.path()).unwrap();
        assert_eq!(content, "Hello");
    }

    #[test]
    fn test_read_prompt_keeps_whitespace() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"  Be brief.\n\n").unwrap();

        let content = read_prompt(file.path()).unwrap();
        assert_eq!(content, "  Be brief.\n\n");
    }

    #[test]
    fn test_read_prompt_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_prompt(&path).unwrap_err();
        match err {
            ChatError::NotFound { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_prompt_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_prompt(dir.path()).unwrap_err();
        assert!(matches!(err, ChatError::NotFound { .. }));
    }
}
