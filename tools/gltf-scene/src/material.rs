//! Material descriptions shared by every fragment

use gltf_json as json;

/// Name given to the fallback material
pub const DEFAULT_MATERIAL_NAME: &str = "defaultMaterial";

pub const DEFAULT_ROUGHNESS: f32 = 0.7;
pub const DEFAULT_METALLIC: f32 = 0.9;
pub const DEFAULT_BASE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// The material used for fragments whose label has no material of its own
///
/// Opaque white, roughness 0.7, metallic 0.9.
pub fn default_material() -> json::Material {
    pbr_material(
        DEFAULT_MATERIAL_NAME,
        DEFAULT_BASE_COLOR,
        DEFAULT_METALLIC,
        DEFAULT_ROUGHNESS,
    )
}

/// Build a metallic-roughness material with no textures
pub fn pbr_material(
    name: &str,
    base_color: [f32; 4],
    metallic: f32,
    roughness: f32,
) -> json::Material {
    json::Material {
        name: Some(name.to_string()),
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor(base_color),
            metallic_factor: json::material::StrengthFactor(metallic),
            roughness_factor: json::material::StrengthFactor(roughness),
            ..Default::default()
        },
        ..Default::default()
    }
}
