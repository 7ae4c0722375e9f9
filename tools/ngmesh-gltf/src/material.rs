//! Label -> material resolution

use crate::error::{Error, Result};
use gltf_scene::{default_material, json};
use std::collections::BTreeMap;

/// Materials keyed by label; `None` selects the default material
///
/// Ordered by label, which also fixes the order index documents are read in.
pub type LabelMaterialMap = BTreeMap<u64, Option<json::Material>>;

/// Extract the label from an index locator whose last segment is `<label>:0`
///
/// Accepts bare names (`12:0`), paths (`mesh/12:0`) and URLs
/// (`http://host:8000/mesh/12:0`).
pub fn parse_label(locator: &str) -> Result<u64> {
    let name = locator.rsplit(['/', '\\']).next().unwrap_or(locator);

    let invalid = || Error::Validation(format!("locator {locator:?} does not match <label>:0"));

    let (digits, rest) = name.split_once(':').ok_or_else(invalid)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if rest != "0" && !rest.starts_with("0:") {
        return Err(invalid());
    }

    digits.parse().map_err(|_| invalid())
}

/// Resolve the material for the object an index locator belongs to
///
/// Falls back to [`default_material`] when there is no map, the label is not
/// in it, or the label maps to `None`.
pub fn resolve_material(locator: &str, labels: Option<&LabelMaterialMap>) -> Result<json::Material> {
    let label = parse_label(locator)?;

    let material = labels
        .and_then(|labels| labels.get(&label))
        .and_then(|material| material.clone())
        .unwrap_or_else(default_material);

    Ok(material)
}
