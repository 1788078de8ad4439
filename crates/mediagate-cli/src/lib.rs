use std::collections::BTreeMap;

use anyhow::Context;
use mediagate_core::{AppConfig, PresetCompiler, TransformPipeline};
use serde::Serialize;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Compile every preset of a bucket, sorted by name
pub fn compile_presets(
    config: &AppConfig,
    bucket: &str,
) -> anyhow::Result<BTreeMap<String, TransformPipeline>> {
    let bucket_config = config.bucket(bucket)?;
    let Some(transform) = bucket_config.transform.as_ref() else {
        return Ok(BTreeMap::new());
    };

    Ok(transform
        .presets
        .iter()
        .map(|(name, preset)| (name.clone(), PresetCompiler::compile(preset)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
buckets:
  photos:
    transform:
      path: "^/t/([^/]+)/(.+)$"
      presets:
        small:
          quality: 75
          filters:
            thumbnail: { size: [100, 100] }
        large:
          quality: 90
          filters:
            crop: { size: "800x" }
    storages:
      basic: { kind: local, rootPath: /srv/photos }
  plain:
    storages:
      basic: { kind: local, rootPath: /srv/plain }
"#;

    #[test]
    fn compile_presets_sorted_by_name() {
        let config = AppConfig::from_yaml_str(YAML).unwrap();
        let presets = compile_presets(&config, "photos").unwrap();

        let names: Vec<_> = presets.keys().cloned().collect();
        assert_eq!(names, vec!["large", "small"]);
        assert_eq!(presets["small"].quality, 75);
        assert!(presets["large"].not_empty);
    }

    #[test]
    fn compile_presets_without_transform_section() {
        let config = AppConfig::from_yaml_str(YAML).unwrap();
        assert!(compile_presets(&config, "plain").unwrap().is_empty());
    }

    #[test]
    fn compile_presets_unknown_bucket() {
        let config = AppConfig::from_yaml_str(YAML).unwrap();
        let err = compile_presets(&config, "videos").unwrap_err();
        assert!(err.to_string().contains("videos"));
    }
}
