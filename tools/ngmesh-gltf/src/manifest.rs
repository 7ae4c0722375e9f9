//! Label manifest parsing
//!
//! A TOML file mapping labels to materials, plus conversion options:
//!
//! ```toml
//! [options]
//! calculate_normal = true
//! normal_output = "normals"
//!
//! [labels]
//! 12 = "default"
//!
//! [labels.13]
//! name = "axon"
//! base_color = [0.8, 0.1, 0.1, 1.0]
//! metallic = 0.2
//! roughness = 0.5
//! ```

use anyhow::{bail, Context, Result};
use gltf_scene::material::{DEFAULT_BASE_COLOR, DEFAULT_METALLIC, DEFAULT_ROUGHNESS};
use gltf_scene::{json, pbr_material};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::convert::ConvertOptions;
use crate::material::LabelMaterialMap;

/// Keyword selecting the default material for a label
const DEFAULT_KEYWORD: &str = "default";

/// Root manifest structure
#[derive(Debug, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub options: OptionsConfig,
    #[serde(default)]
    pub labels: BTreeMap<String, LabelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OptionsConfig {
    #[serde(default = "default_true")]
    pub calculate_normal: bool,
    #[serde(default)]
    pub normal_output: Option<PathBuf>,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            calculate_normal: true,
            normal_output: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LabelEntry {
    Keyword(String),
    Material(MaterialEntry),
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MaterialEntry {
    pub name: Option<String>,
    pub base_color: Option<[f32; 4]>,
    pub metallic: Option<f32>,
    pub roughness: Option<f32>,
    #[serde(default)]
    pub double_sided: bool,
    pub emissive: Option<[f32; 3]>,
}

impl MaterialEntry {
    /// Build the material, taking unset factors from the default material
    pub fn to_material(&self, label: u64) -> json::Material {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("label-{label}"));

        let mut material = pbr_material(
            &name,
            self.base_color.unwrap_or(DEFAULT_BASE_COLOR),
            self.metallic.unwrap_or(DEFAULT_METALLIC),
            self.roughness.unwrap_or(DEFAULT_ROUGHNESS),
        );
        material.double_sided = self.double_sided;
        if let Some(emissive) = self.emissive {
            material.emissive_factor = json::material::EmissiveFactor(emissive);
        }
        material
    }
}

impl Manifest {
    /// Label map, or `None` when the manifest names no labels
    pub fn label_map(&self) -> Result<Option<LabelMaterialMap>> {
        if self.labels.is_empty() {
            return Ok(None);
        }

        let mut map = LabelMaterialMap::new();
        for (key, entry) in &self.labels {
            let label: u64 = key
                .parse()
                .with_context(|| format!("Label {:?} is not an unsigned integer", key))?;

            let material = match entry {
                LabelEntry::Keyword(keyword) if keyword == DEFAULT_KEYWORD => None,
                LabelEntry::Keyword(keyword) => {
                    bail!(
                        "Label {} has unknown material {:?} (use \"{}\" or a table)",
                        label,
                        keyword,
                        DEFAULT_KEYWORD
                    )
                }
                LabelEntry::Material(entry) => Some(entry.to_material(label)),
            };
            map.insert(label, material);
        }

        Ok(Some(map))
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            calculate_normal: self.options.calculate_normal,
            normal_output: self.options.normal_output.clone(),
        }
    }
}

/// Parse a manifest from TOML text
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    toml::from_str(content).context("Failed to parse manifest")
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&content).with_context(|| format!("Invalid manifest: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gltf_scene::material::DEFAULT_MATERIAL_NAME;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
        [options]
        calculate_normal = false
        normal_output = "normals"

        [labels]
        12 = "default"

        [labels.13]
        name = "axon"
        base_color = [0.8, 0.1, 0.1, 1.0]
        roughness = 0.5
        double_sided = true
    "#;

    #[test]
    fn test_parse_sample() {
        let manifest = parse_manifest(SAMPLE).unwrap();
        let options = manifest.convert_options();
        assert!(!options.calculate_normal);
        assert_eq!(options.normal_output, Some(PathBuf::from("normals")));

        let labels = manifest.label_map().unwrap().unwrap();
        assert_eq!(labels.len(), 2);
        assert!(labels[&12].is_none());

        let axon = labels[&13].as_ref().unwrap();
        assert_eq!(axon.name.as_deref(), Some("axon"));
        assert_eq!(axon.pbr_metallic_roughness.base_color_factor.0, [0.8, 0.1, 0.1, 1.0]);
        assert_eq!(axon.pbr_metallic_roughness.roughness_factor.0, 0.5);
        // Unset factors come from the default material
        assert_eq!(axon.pbr_metallic_roughness.metallic_factor.0, DEFAULT_METALLIC);
        assert!(axon.double_sided);
    }

    #[test]
    fn test_empty_manifest_defaults() {
        let manifest = parse_manifest("").unwrap();
        assert!(manifest.label_map().unwrap().is_none());
        assert!(manifest.convert_options().calculate_normal);
    }

    #[test]
    fn test_unnamed_material_gets_label_name() {
        let manifest = parse_manifest("[labels.7]\nmetallic = 0.0\n").unwrap();
        let labels = manifest.label_map().unwrap().unwrap();
        let material = labels[&7].as_ref().unwrap();
        assert_eq!(material.name.as_deref(), Some("label-7"));
        assert_ne!(material.name.as_deref(), Some(DEFAULT_MATERIAL_NAME));
    }

    #[test]
    fn test_non_numeric_label_rejected() {
        let manifest = parse_manifest("[labels]\naxon = \"default\"\n").unwrap();
        assert!(manifest.label_map().is_err());
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let manifest = parse_manifest("[labels]\n4 = \"shiny\"\n").unwrap();
        assert!(manifest.label_map().is_err());
    }

    #[test]
    fn test_load_manifest_from_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("labels.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.labels.len(), 2);
        assert!(load_manifest(&dir.path().join("missing.toml")).is_err());
    }
}
