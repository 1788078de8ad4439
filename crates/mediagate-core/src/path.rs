//! Request path decoding
//!
//! Splits `/{bucket}/{key...}` request paths and classifies which namespace
//! they belong to. Neither step consults bucket configuration.

use regex::Regex;

use crate::error::ResolveError;
use crate::models::UriType;

/// Default pattern for the locally-served namespace
pub const DEFAULT_LOCAL_PATTERN: &str = r"/media/.*";

/// Bucket name and storage key decoded from a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    pub bucket: String,
    /// Always starts with `/`
    pub key: String,
}

/// Split a raw request path into bucket name and storage key
///
/// The path is split on `/`; element 1 is the bucket and the remaining elements,
/// rejoined, form the key.
pub fn decode_path(path: &str) -> Result<DecodedPath, ResolveError> {
    let elements: Vec<&str> = path.split('/').collect();
    if elements.len() < 3 {
        return Err(ResolveError::InvalidPath(path.to_string()));
    }

    Ok(DecodedPath {
        bucket: elements[1].to_string(),
        key: format!("/{}", elements[2..].join("/")),
    })
}

/// Classifies request paths as local or remote by a configured pattern
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    local: Regex,
}

impl SourceClassifier {
    pub fn new(local_pattern: &str) -> Result<Self, regex::Error> {
        Ok(SourceClassifier {
            local: Regex::new(local_pattern)?,
        })
    }

    pub fn classify(&self, path: &str) -> UriType {
        if self.local.is_match(path) {
            UriType::Local
        } else {
            UriType::Remote
        }
    }

    pub fn pattern(&self) -> &str {
        self.local.as_str()
    }
}

impl Default for SourceClassifier {
    fn default() -> Self {
        SourceClassifier {
            local: Regex::new(DEFAULT_LOCAL_PATTERN).expect("default local pattern is valid"),
        }
    }
}
