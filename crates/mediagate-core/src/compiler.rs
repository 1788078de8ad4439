//! Preset compiler - turns a preset definition into a transform pipeline

use crate::models::{FilterSpec, PresetDefinition, TransformPipeline};

/// Compiles presets into ordered transform pipelines
pub struct PresetCompiler;

impl PresetCompiler {
    /// Compile a preset into a pipeline
    ///
    /// Steps are always emitted in this order, whatever order the filters were
    /// declared in:
    /// 1. Thumbnail (resize)
    /// 2. Smart crop
    /// 3. Crop
    ///
    /// Filters with an empty size are skipped. Quality is copied even when no
    /// step is emitted.
    pub fn compile(preset: &PresetDefinition) -> TransformPipeline {
        let mut pipeline = TransformPipeline::new();
        let filters = &preset.filters;

        if let Some(thumbnail) = Self::active(filters.thumbnail) {
            pipeline.resize(thumbnail.size, thumbnail.mode.is_outbound());
        }

        if let Some(smart_crop) = Self::active(filters.smart_crop) {
            pipeline.crop(smart_crop.size, smart_crop.mode.is_outbound(), true);
        }

        if let Some(crop) = Self::active(filters.crop) {
            pipeline.crop(crop.size, crop.mode.is_outbound(), false);
        }

        pipeline.quality = preset.quality.min(100) as u8;
        pipeline
    }

    fn active(filter: Option<FilterSpec>) -> Option<FilterSpec> {
        filter.filter(|spec| !spec.size.is_empty())
    }
}
