//! Per-fragment sub-document assembly
//!
//! Every fragment owns a contiguous block of accessors, buffer views and
//! buffers. The block for fragment `n` starts at `n * stride`, so the blocks
//! of consecutive fragments never overlap once concatenated in ordinal order
//! by [`SceneBuilder`](crate::SceneBuilder).
//!
//! Per fragment:
//! - 1 node, 1 mesh, 1 material
//! - 2 accessors / 2 buffer views / 1 buffer (indices + positions)
//! - +1 accessor / +1 buffer view / +1 buffer with normals

use crate::utils::{compute_bounds, encode_data_uri, Bounds};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use std::collections::BTreeMap;

/// Size of the vertex count header at the start of a fragment buffer
pub const HEADER_BYTES: u64 = 4;

/// Size of one float32 Vec3 (position or normal)
pub const VEC3_BYTES: u64 = 12;

/// Size of one uint32 index
pub const INDEX_BYTES: u64 = 4;

/// Summary of one decoded fragment, ready for assembly
#[derive(Debug, Clone)]
pub struct FragmentInfo {
    /// Locator of the raw fragment buffer (filesystem path or URL)
    pub uri: String,
    pub vertex_count: u32,
    pub face_count: u32,
    /// Bounding box over vertex positions
    pub bounds: Bounds,
    /// Per-vertex normals, present when normals were estimated
    pub normals: Option<FragmentNormals>,
    pub material: json::Material,
}

impl FragmentInfo {
    /// Number of scalar indices (three per face)
    pub fn index_count(&self) -> u64 {
        self.face_count as u64 * 3
    }

    /// Byte length of the raw fragment buffer
    pub fn byte_length(&self) -> u64 {
        HEADER_BYTES + self.vertex_count as u64 * VEC3_BYTES + self.index_count() * INDEX_BYTES
    }
}

/// Per-vertex normals of a fragment
#[derive(Debug, Clone, Default)]
pub struct FragmentNormals {
    pub data: Vec<[f32; 3]>,
    /// External file holding the normal buffer; embedded as a data URI if `None`
    pub external_uri: Option<String>,
}

impl FragmentNormals {
    pub fn embedded(data: Vec<[f32; 3]>) -> Self {
        Self {
            data,
            external_uri: None,
        }
    }
}

/// Raw little-endian bytes of a normal array
pub fn normal_bytes(normals: &[[f32; 3]]) -> &[u8] {
    bytemuck::cast_slice(normals)
}

/// Index arithmetic for a fragment's block of resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentLayout {
    include_normals: bool,
}

impl FragmentLayout {
    pub const fn new(include_normals: bool) -> Self {
        Self { include_normals }
    }

    pub const fn include_normals(&self) -> bool {
        self.include_normals
    }

    /// Accessors per fragment
    pub const fn accessor_stride(&self) -> u32 {
        if self.include_normals { 3 } else { 2 }
    }

    /// Buffer views per fragment
    pub const fn view_stride(&self) -> u32 {
        if self.include_normals { 3 } else { 2 }
    }

    /// Buffers per fragment (geometry, plus normals)
    pub const fn buffer_stride(&self) -> u32 {
        if self.include_normals { 2 } else { 1 }
    }

    pub const fn indices_accessor(&self, ordinal: u32) -> u32 {
        ordinal * self.accessor_stride()
    }

    pub const fn positions_accessor(&self, ordinal: u32) -> u32 {
        ordinal * self.accessor_stride() + 1
    }

    pub const fn normals_accessor(&self, ordinal: u32) -> Option<u32> {
        if self.include_normals {
            Some(ordinal * self.accessor_stride() + 2)
        } else {
            None
        }
    }

    pub const fn indices_view(&self, ordinal: u32) -> u32 {
        ordinal * self.view_stride()
    }

    pub const fn positions_view(&self, ordinal: u32) -> u32 {
        ordinal * self.view_stride() + 1
    }

    pub const fn normals_view(&self, ordinal: u32) -> Option<u32> {
        if self.include_normals {
            Some(ordinal * self.view_stride() + 2)
        } else {
            None
        }
    }

    pub const fn geometry_buffer(&self, ordinal: u32) -> u32 {
        ordinal * self.buffer_stride()
    }

    pub const fn normals_buffer(&self, ordinal: u32) -> Option<u32> {
        if self.include_normals {
            Some(ordinal * self.buffer_stride() + 1)
        } else {
            None
        }
    }
}

/// Self-contained scene fragment with pre-offset indices
#[derive(Debug, Clone, Default)]
pub struct FragmentDocument {
    pub nodes: Vec<json::Node>,
    pub meshes: Vec<json::Mesh>,
    pub accessors: Vec<json::Accessor>,
    pub buffer_views: Vec<json::buffer::View>,
    pub buffers: Vec<json::Buffer>,
    pub materials: Vec<json::Material>,
}

/// Assemble the sub-document for fragment `ordinal`
///
/// Indices and positions are referenced in place inside the fragment's own
/// buffer (by URI). Normals are derived data, so they get a separate buffer,
/// embedded as base64 unless an external file was written for them. When
/// `include_normals` is set but `info` carries none, zero normals are emitted.
pub fn assemble(info: &FragmentInfo, ordinal: u32, include_normals: bool) -> FragmentDocument {
    let layout = FragmentLayout::new(include_normals);
    let vertex_count = info.vertex_count as u64;
    let vertex_bytes = vertex_count * VEC3_BYTES;

    let mut doc = FragmentDocument::default();

    doc.nodes.push(json::Node {
        camera: None,
        children: None,
        extensions: Default::default(),
        extras: Default::default(),
        matrix: None,
        mesh: Some(json::Index::new(ordinal)),
        name: Some(info.uri.clone()),
        rotation: None,
        scale: None,
        translation: None,
        skin: None,
        weights: None,
    });

    let mut attributes = BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        json::Index::new(layout.positions_accessor(ordinal)),
    );
    if let Some(normals) = layout.normals_accessor(ordinal) {
        attributes.insert(
            Valid(json::mesh::Semantic::Normals),
            json::Index::new(normals),
        );
    }

    doc.meshes.push(json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some(info.uri.clone()),
        primitives: vec![json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: Some(json::Index::new(layout.indices_accessor(ordinal))),
            material: Some(json::Index::new(ordinal)),
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        }],
        weights: None,
    });

    // Indices
    doc.accessors.push(accessor(
        layout.indices_view(ordinal),
        info.index_count(),
        json::accessor::ComponentType::U32,
        json::accessor::Type::Scalar,
        None,
    ));
    doc.buffer_views.push(buffer_view(
        layout.geometry_buffer(ordinal),
        HEADER_BYTES + vertex_bytes,
        info.index_count() * INDEX_BYTES,
        None,
        json::buffer::Target::ElementArrayBuffer,
    ));

    // Positions
    doc.accessors.push(accessor(
        layout.positions_view(ordinal),
        vertex_count,
        json::accessor::ComponentType::F32,
        json::accessor::Type::Vec3,
        Some(info.bounds),
    ));
    doc.buffer_views.push(buffer_view(
        layout.geometry_buffer(ordinal),
        HEADER_BYTES,
        vertex_bytes,
        Some(VEC3_BYTES as usize),
        json::buffer::Target::ArrayBuffer,
    ));

    doc.buffers.push(json::Buffer {
        byte_length: info.byte_length().into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: Some(info.uri.clone()),
    });

    if let (Some(view), Some(buffer)) = (layout.normals_view(ordinal), layout.normals_buffer(ordinal)) {
        let zeroed;
        let normals = match &info.normals {
            Some(normals) => normals,
            None => {
                tracing::warn!("No normals for {}, emitting zero normals", info.uri);
                zeroed = FragmentNormals::embedded(vec![[0.0; 3]; info.vertex_count as usize]);
                &zeroed
            }
        };

        doc.accessors.push(accessor(
            view,
            vertex_count,
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            Some(compute_bounds(&normals.data)),
        ));
        doc.buffer_views.push(buffer_view(
            buffer,
            0,
            vertex_bytes,
            Some(VEC3_BYTES as usize),
            json::buffer::Target::ArrayBuffer,
        ));

        let uri = match &normals.external_uri {
            Some(uri) => uri.clone(),
            None => encode_data_uri(normal_bytes(&normals.data)),
        };
        doc.buffers.push(json::Buffer {
            byte_length: vertex_bytes.into(),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            uri: Some(uri),
        });
    }

    doc.materials.push(info.material.clone());

    doc
}

fn accessor(
    view: u32,
    count: u64,
    component_type: json::accessor::ComponentType,
    type_: json::accessor::Type,
    bounds: Option<Bounds>,
) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(json::Index::new(view)),
        byte_offset: Some(0u64.into()),
        count: count.into(),
        component_type: Valid(json::accessor::GenericComponentType(component_type)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(type_),
        min: bounds.map(|b| b.min_value()),
        max: bounds.map(|b| b.max_value()),
        name: None,
        normalized: false,
        sparse: None,
    }
}

fn buffer_view(
    buffer: u32,
    byte_offset: u64,
    byte_length: u64,
    byte_stride: Option<usize>,
    target: json::buffer::Target,
) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(buffer),
        byte_length: byte_length.into(),
        byte_offset: Some(byte_offset.into()),
        byte_stride: byte_stride.map(json::buffer::Stride),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        target: Some(Valid(target)),
    }
}
