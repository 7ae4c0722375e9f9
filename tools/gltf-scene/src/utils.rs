//! Utility functions for scene construction

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gltf_json as json;

/// Axis-aligned bounding box over a set of 3-component vectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    /// Bounds of an empty set
    pub const EMPTY: Bounds = Bounds {
        min: [0.0; 3],
        max: [0.0; 3],
    };

    /// Accessor `min` value
    pub fn min_value(&self) -> json::Value {
        json::Value::Array(self.min.iter().copied().map(json::Value::from).collect())
    }

    /// Accessor `max` value
    pub fn max_value(&self) -> json::Value {
        json::Value::Array(self.max.iter().copied().map(json::Value::from).collect())
    }
}

/// Compute bounding box for positions (or any Vec3 data)
///
/// Uses a numeric min/max reduction per axis. NaN components are skipped
/// by `f32::min`/`f32::max`. An empty slice yields [`Bounds::EMPTY`].
pub fn compute_bounds(positions: &[[f32; 3]]) -> Bounds {
    if positions.is_empty() {
        return Bounds::EMPTY;
    }

    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];

    for pos in positions {
        for i in 0..3 {
            min[i] = min[i].min(pos[i]);
            max[i] = max[i].max(pos[i]);
        }
    }

    Bounds { min, max }
}

/// Encode bytes as an `application/octet-stream` base64 data URI
pub fn encode_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:application/octet-stream;base64,{}",
        STANDARD.encode(bytes)
    )
}
