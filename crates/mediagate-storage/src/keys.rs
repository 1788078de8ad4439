//! Shared key normalization for storage backends.
//!
//! Resolved keys start with `/`; backends address objects without it.

use crate::traits::{StorageError, StorageResult};

/// Turn a resolved key (`/2024/pic.jpg`) into a backend key (`2024/pic.jpg`).
///
/// Rejects empty keys and keys containing `..` segments. All backends must go
/// through this so local and S3 layouts stay identical.
pub fn normalize_key(storage_key: &str) -> StorageResult<String> {
    let key = storage_key.trim_start_matches('/');

    if key.is_empty() {
        return Err(StorageError::InvalidKey(format!(
            "empty storage key: {:?}",
            storage_key
        )));
    }

    if key.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_slash() {
        assert_eq!(normalize_key("/2024/pic.jpg").unwrap(), "2024/pic.jpg");
        assert_eq!(normalize_key("a.png").unwrap(), "a.png");
    }

    #[test]
    fn test_rejects_traversal_and_empty() {
        assert!(matches!(
            normalize_key("/../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            normalize_key("/a/../../b"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(normalize_key("/"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_dots_inside_names_are_fine() {
        assert_eq!(normalize_key("/a..b/c.jpg").unwrap(), "a..b/c.jpg");
    }
}
