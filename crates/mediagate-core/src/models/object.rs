//! Resolved object descriptor

use serde::{Serialize, Serializer};

use super::storage::StorageConfig;
use super::transforms::TransformPipeline;

/// Which namespace a request path belongs to
///
/// Serialized as its numeric code (0 = remote, 1 = local).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum UriType {
    #[default]
    Remote = 0,
    Local = 1,
}

impl Serialize for UriType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Everything needed to serve one request path: where the bytes live, and
/// for derived objects, which original to read and how to transform it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescriptor {
    pub uri: String,
    pub bucket: String,
    pub key: String,
    pub uri_type: UriType,
    /// Key of the original this object is derived from; empty for originals
    pub parent: String,
    pub transforms: TransformPipeline,
    pub storage: StorageConfig,
}

impl ObjectDescriptor {
    pub fn has_parent(&self) -> bool {
        !self.parent.is_empty()
    }

    pub fn has_transform(&self) -> bool {
        self.transforms.not_empty
    }

    /// Request path that addresses the parent object in the same bucket
    pub fn parent_path(&self) -> Option<String> {
        self.has_parent()
            .then(|| format!("/{}{}", self.bucket, self.parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(parent: &str) -> ObjectDescriptor {
        ObjectDescriptor {
            uri: "/photos/t/small/a.jpg".to_string(),
            bucket: "photos".to_string(),
            key: "/t/small/a.jpg".to_string(),
            uri_type: UriType::Remote,
            parent: parent.to_string(),
            transforms: TransformPipeline::new(),
            storage: StorageConfig::local("/srv"),
        }
    }

    #[test]
    fn test_parent_path_includes_bucket() {
        let obj = descriptor("/a.jpg");
        assert!(obj.has_parent());
        assert_eq!(obj.parent_path().as_deref(), Some("/photos/a.jpg"));
    }

    #[test]
    fn test_original_has_no_parent_path() {
        let obj = descriptor("");
        assert!(!obj.has_parent());
        assert_eq!(obj.parent_path(), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut obj = descriptor("/a.jpg");
        obj.uri_type = UriType::Local;
        let value = serde_json::to_value(&obj).unwrap();

        assert_eq!(value["uri"], "/photos/t/small/a.jpg");
        assert_eq!(value["bucket"], "photos");
        assert_eq!(value["key"], "/t/small/a.jpg");
        assert_eq!(value["uriType"], 1);
        assert_eq!(value["parent"], "/a.jpg");
        assert_eq!(value["transforms"]["notEmpty"], false);
        assert_eq!(value["storage"]["kind"], "local");
    }
}
