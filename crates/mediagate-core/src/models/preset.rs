//! Preset models for reusable transformation definitions

use serde::{Deserialize, Serialize};

use super::transforms::Dimensions;

/// How a resize or crop fits the target size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Cover the target box, cropping the overflow
    Outbound,
    /// Fit inside the target box; any unrecognised mode falls back to this
    #[default]
    #[serde(other)]
    Inbound,
}

impl FitMode {
    pub fn is_outbound(self) -> bool {
        self == FitMode::Outbound
    }
}

/// One resize/crop filter of a preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub size: Dimensions,
    #[serde(default)]
    pub mode: FitMode,
}

impl FilterSpec {
    pub fn new(size: Dimensions, mode: FitMode) -> Self {
        FilterSpec { size, mode }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetFilters {
    #[serde(default)]
    pub thumbnail: Option<FilterSpec>,
    #[serde(default)]
    pub smart_crop: Option<FilterSpec>,
    #[serde(default)]
    pub crop: Option<FilterSpec>,
}

/// Named preset as it appears in a bucket's preset table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDefinition {
    /// Read wider than the pipeline's `u8` so out-of-range values reach `validate`
    #[serde(default)]
    pub quality: u32,
    #[serde(default)]
    pub filters: PresetFilters,
}

impl PresetDefinition {
    /// Validate the preset quality (0-100)
    pub fn validate(&self) -> Result<(), String> {
        if self.quality > 100 {
            return Err(format!(
                "quality must be between 0 and 100, got {}",
                self.quality
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preset_yaml() {
        let yaml = r#"
quality: 75
filters:
  thumbnail:
    size: [100, 100]
    mode: outbound
  smart_crop:
    size: "50x50"
"#;
        let preset: PresetDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(preset.quality, 75);

        let thumbnail = preset.filters.thumbnail.unwrap();
        assert_eq!(thumbnail.size, Dimensions::new(100, 100));
        assert!(thumbnail.mode.is_outbound());

        let smart_crop = preset.filters.smart_crop.unwrap();
        assert_eq!(smart_crop.mode, FitMode::Inbound);
        assert!(preset.filters.crop.is_none());
    }

    #[test]
    fn test_unknown_mode_is_inbound() {
        let spec: FilterSpec = serde_yaml::from_str("size: [10, 10]\nmode: sideways").unwrap();
        assert_eq!(spec.mode, FitMode::Inbound);
    }

    #[test]
    fn test_validate_quality_range() {
        let mut preset = PresetDefinition {
            quality: 100,
            ..Default::default()
        };
        assert!(preset.validate().is_ok());
        preset.quality = 101;
        assert!(preset.validate().is_err());
    }

    #[test]
    fn test_large_quality_reaches_validation() {
        let preset: PresetDefinition = serde_yaml::from_str("quality: 300").unwrap();
        let err = preset.validate().unwrap_err();
        assert!(err.contains("between 0 and 100"));
        assert!(err.contains("300"));
    }
}
