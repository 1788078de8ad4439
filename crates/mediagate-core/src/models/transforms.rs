//! Compiled transform pipeline models
//!
//! A [`TransformPipeline`] is what a preset compiles into: the ordered resize/crop
//! steps to apply to a parent object, plus the output quality.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Target size of a resize or crop filter
///
/// Either side may be omitted to keep the aspect ratio. A size with neither side
/// set is "empty" and means the filter is not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Dimensions {
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Parse dimensions from string format: "WxH", "Wx", or "xH"
    ///
    /// An empty string parses to an empty size.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Dimensions::default());
        }

        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            return Err("Invalid dimensions format. Expected: WxH, Wx, or xH".to_string());
        }

        let width = Self::parse_side(parts[0], "width")?;
        let height = Self::parse_side(parts[1], "height")?;

        if width.is_none() && height.is_none() {
            return Err("At least one dimension must be specified".to_string());
        }

        Ok(Dimensions { width, height })
    }

    fn parse_side(value: &str, name: &str) -> Result<Option<u32>, String> {
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| format!("Invalid {}: {}", name, value))
    }

    fn from_list(values: &[u32]) -> Result<Self, String> {
        match values {
            [] => Ok(Dimensions::default()),
            [width] => Ok(Dimensions {
                width: Some(*width),
                height: None,
            }),
            [width, height] => Ok(Dimensions::new(*width, *height)),
            _ => Err(format!(
                "Size lists take at most two values, got {}",
                values.len()
            )),
        }
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(width) = self.width {
            write!(f, "{}", width)?;
        }
        write!(f, "x")?;
        if let Some(height) = self.height {
            write!(f, "{}", height)?;
        }
        Ok(())
    }
}

impl Serialize for Dimensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    List(Vec<u32>),
    Text(String),
}

/// Accepts `[w, h]`, `[w]`, `[]`, or a `"WxH"` string.
impl<'de> Deserialize<'de> for Dimensions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match SizeRepr::deserialize(deserializer)? {
            SizeRepr::List(values) => Dimensions::from_list(&values),
            SizeRepr::Text(text) => Dimensions::parse(&text),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// A single step of a transform pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum TransformStep {
    Resize {
        size: Dimensions,
        outbound: bool,
    },
    Crop {
        size: Dimensions,
        outbound: bool,
        /// Content-aware crop (smart-crop filter) rather than a plain one
        smart: bool,
    },
}

impl TransformStep {
    pub fn size(&self) -> Dimensions {
        match self {
            TransformStep::Resize { size, .. } | TransformStep::Crop { size, .. } => *size,
        }
    }
}

/// Ordered transform steps plus output quality
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPipeline {
    pub steps: Vec<TransformStep>,
    pub quality: u8,
    /// True once any resize or crop step has been added; quality alone never sets it
    pub not_empty: bool,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resize step
    pub fn resize(&mut self, size: Dimensions, outbound: bool) -> &mut Self {
        self.push(TransformStep::Resize { size, outbound })
    }

    /// Append a crop step
    pub fn crop(&mut self, size: Dimensions, outbound: bool, smart: bool) -> &mut Self {
        self.push(TransformStep::Crop {
            size,
            outbound,
            smart,
        })
    }

    fn push(&mut self, step: TransformStep) -> &mut Self {
        self.steps.push(step);
        self.not_empty = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.not_empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(Dimensions::parse("200x100").unwrap(), Dimensions::new(200, 100));
        let width_only = Dimensions::parse("300x").unwrap();
        assert_eq!(width_only.width, Some(300));
        assert_eq!(width_only.height, None);
        let height_only = Dimensions::parse("x50").unwrap();
        assert_eq!(height_only.width, None);
        assert_eq!(height_only.height, Some(50));
        assert!(Dimensions::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_dimensions_rejects_garbage() {
        assert!(Dimensions::parse("x").is_err());
        assert!(Dimensions::parse("200").is_err());
        assert!(Dimensions::parse("ax10").is_err());
        assert!(Dimensions::parse("1x2x3").is_err());
    }

    #[test]
    fn test_deserialize_list_and_string() {
        let from_list: Dimensions = serde_json::from_str("[640, 480]").unwrap();
        assert_eq!(from_list, Dimensions::new(640, 480));

        let from_text: Dimensions = serde_json::from_str("\"640x480\"").unwrap();
        assert_eq!(from_text, from_list);

        let empty: Dimensions = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());

        assert!(serde_json::from_str::<Dimensions>("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_quality_alone_is_empty() {
        let pipeline = TransformPipeline {
            quality: 90,
            ..TransformPipeline::new()
        };
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_steps_keep_insertion_order() {
        let mut pipeline = TransformPipeline::new();
        pipeline
            .resize(Dimensions::new(100, 100), true)
            .crop(Dimensions::new(50, 50), false, false);

        assert!(pipeline.not_empty);
        assert!(matches!(pipeline.steps[0], TransformStep::Resize { .. }));
        assert!(matches!(pipeline.steps[1], TransformStep::Crop { .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let mut pipeline = TransformPipeline::new();
        pipeline.resize(Dimensions::new(200, 200), true);
        pipeline.quality = 80;

        let value = serde_json::to_value(&pipeline).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "steps": [{ "op": "resize", "size": "200x200", "outbound": true }],
                "quality": 80,
                "notEmpty": true
            })
        );
    }
}
