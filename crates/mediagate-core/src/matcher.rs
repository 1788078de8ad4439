//! Transform path matching
//!
//! A bucket's transform pattern decides whether a storage key addresses a derived
//! object. Matching is behind [`TransformMatcher`] so the regex engine can be
//! replaced by a structured path template without touching the resolver.

use std::fmt::Debug;

use regex::Regex;

/// Preset name and parent suffix extracted from a derived object's key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformMatch {
    pub preset_name: String,
    /// Parent key relative to the bucket, without the leading `/`
    pub parent_suffix: String,
}

impl TransformMatch {
    /// Parent key as stored in the bucket (always starts with `/`)
    pub fn parent_key(&self) -> String {
        format!("/{}", self.parent_suffix)
    }
}

pub trait TransformMatcher: Send + Sync + Debug {
    /// Match a storage key; `None` means the key addresses an original object
    fn match_key(&self, key: &str) -> Option<TransformMatch>;
}

/// Regex-backed matcher: capture group 1 is the preset name, group 2 the parent suffix
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    pattern: Regex,
}

impl RegexMatcher {
    /// Compile a transform pattern
    ///
    /// The pattern must declare at least two capture groups.
    pub fn new(pattern: &str) -> Result<Self, String> {
        let pattern =
            Regex::new(pattern).map_err(|e| format!("Invalid transform pattern: {}", e))?;

        // captures_len counts the implicit whole-match group
        if pattern.captures_len() < 3 {
            return Err(format!(
                "Transform pattern {} needs two capture groups (preset, parent), found {}",
                pattern.as_str(),
                pattern.captures_len() - 1
            ));
        }

        Ok(RegexMatcher { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl TransformMatcher for RegexMatcher {
    fn match_key(&self, key: &str) -> Option<TransformMatch> {
        let captures = self.pattern.captures(key)?;
        let group = |i: usize| captures.get(i).map_or("", |m| m.as_str()).to_string();

        Some(TransformMatch {
            preset_name: group(1),
            parent_suffix: group(2),
        })
    }
}
