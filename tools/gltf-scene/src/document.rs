//! Scene document reconstruction from fragment sub-documents

use crate::fragment::FragmentDocument;
use gltf_json as json;

/// Name of the synthetic root node
pub const ROOT_NODE_NAME: &str = "rootNode";

/// Name of the single scene
pub const SCENE_NAME: &str = "singleScene";

/// Root rotation: -90 degrees about X, turning the source's Z-up data into
/// glTF's Y-up frame
pub const ROOT_ROTATION: [f32; 4] = [0.707106781, 0.0, 0.0, -0.707106781];

/// Root scale: source meshes are in nanometers, glTF in meters
pub const NANOMETERS_TO_METERS: f32 = 1e-9;

/// Builder that concatenates fragment sub-documents in ordinal order
///
/// Fragments must be appended in the same order as the ordinals they were
/// assembled with, since their internal indices are already offset.
pub struct SceneBuilder {
    nodes: Vec<json::Node>,
    meshes: Vec<json::Mesh>,
    accessors: Vec<json::Accessor>,
    buffer_views: Vec<json::buffer::View>,
    buffers: Vec<json::Buffer>,
    materials: Vec<json::Material>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            meshes: Vec::new(),
            accessors: Vec::new(),
            buffer_views: Vec::new(),
            buffers: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Append the next fragment
    pub fn append(&mut self, fragment: FragmentDocument) -> &mut Self {
        self.nodes.extend(fragment.nodes);
        self.meshes.extend(fragment.meshes);
        self.accessors.extend(fragment.accessors);
        self.buffer_views.extend(fragment.buffer_views);
        self.buffers.extend(fragment.buffers);
        self.materials.extend(fragment.materials);
        self
    }

    /// Number of fragment nodes appended so far
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Build the final document with the root node prepended
    pub fn build(self, generator: &str) -> json::Root {
        let children: Vec<json::Index<json::Node>> =
            (1..=self.node_count()).map(json::Index::new).collect();

        let root_node = json::Node {
            camera: None,
            children: if children.is_empty() {
                None
            } else {
                Some(children)
            },
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: None,
            name: Some(ROOT_NODE_NAME.to_string()),
            rotation: Some(json::scene::UnitQuaternion(ROOT_ROTATION)),
            scale: Some([NANOMETERS_TO_METERS; 3]),
            translation: Some([0.0; 3]),
            skin: None,
            weights: None,
        };

        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.push(root_node);
        nodes.extend(self.nodes);

        json::Root {
            accessors: self.accessors,
            animations: Vec::new(),
            asset: json::Asset {
                copyright: None,
                extensions: Default::default(),
                extras: Default::default(),
                generator: Some(generator.to_string()),
                min_version: None,
                version: "2.0".to_string(),
            },
            buffers: self.buffers,
            buffer_views: self.buffer_views,
            cameras: Vec::new(),
            extensions: Default::default(),
            extensions_required: Vec::new(),
            extensions_used: Vec::new(),
            extras: Default::default(),
            images: Vec::new(),
            materials: self.materials,
            meshes: self.meshes,
            nodes,
            samplers: Vec::new(),
            scene: Some(json::Index::new(0)),
            scenes: vec![json::Scene {
                extensions: Default::default(),
                extras: Default::default(),
                name: Some(SCENE_NAME.to_string()),
                nodes: vec![json::Index::new(0)],
            }],
            skins: Vec::new(),
            textures: Vec::new(),
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge fragment sub-documents, in ordinal order, into one scene document
pub fn reconstruct<I>(fragments: I, generator: &str) -> json::Root
where
    I: IntoIterator<Item = FragmentDocument>,
{
    let mut builder = SceneBuilder::new();
    for fragment in fragments {
        builder.append(fragment);
    }
    tracing::debug!("Reconstructed scene with {} fragments", builder.node_count());
    builder.build(generator)
}
