use crate::camera::ImageSize;
use crate::params::{ClusterParams, FilterParams, LoadParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct GroupLinesConfig {
    /// JSON array of detector segments in emission order.
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Image the segments were detected on; only its size is read.
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// Explicit size, takes precedence over `image`.
    #[serde(default)]
    pub image_size: Option<ImageSize>,
    #[serde(default)]
    pub load: LoadParams,
    #[serde(default)]
    pub filter: FilterParams,
    #[serde(default)]
    pub cluster: ClusterParams,
    pub output: GroupLinesOutputConfig,
}

impl GroupLinesConfig {
    /// Size the detector saw: `image_size`, or the header size of `image`
    /// scaled by `load.scale`.
    pub fn resolve_image_size(&self) -> Result<ImageSize, String> {
        if let Some(size) = self.image_size {
            return Ok(size);
        }
        let path = self
            .image
            .as_ref()
            .ok_or("Config needs either `image_size` or `image`")?;
        let (w, h) = image::image_dimensions(path)
            .map_err(|e| format!("Failed to read size of {}: {e}", path.display()))?;
        let scale = self.load.scale;
        Ok(ImageSize::new(
            ((w as f64 * scale).round() as u32).max(1),
            ((h as f64 * scale).round() as u32).max(1),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct GroupLinesOutputConfig {
    #[serde(rename = "groups_json")]
    pub groups_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<GroupLinesConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let json = r#"{
            "input": "segments.json",
            "image_size": {"width": 800, "height": 600},
            "output": {"groups_json": "out/groups.json"}
        }"#;
        let cfg: GroupLinesConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.filter, FilterParams::default());
        assert_eq!(cfg.cluster, ClusterParams::default());
        assert_eq!(cfg.resolve_image_size().unwrap(), ImageSize::new(800, 600));
    }

    #[test]
    fn partial_stage_overrides_keep_other_defaults() {
        let json = r#"{
            "input": "segments.json",
            "image_size": {"width": 10, "height": 10},
            "filter": {"centrality_threshold": 12.5},
            "output": {"groups_json": "g.json"}
        }"#;
        let cfg: GroupLinesConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.filter.centrality_threshold, 12.5);
        assert_eq!(cfg.filter.length_threshold, 25.0);
    }

    #[test]
    fn missing_size_source_is_reported() {
        let json = r#"{"input": "s.json", "output": {"groups_json": "g.json"}}"#;
        let cfg: GroupLinesConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.resolve_image_size().is_err());
    }
}
