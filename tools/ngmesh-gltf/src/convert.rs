//! Conversion pipeline: index documents -> fragments -> scene document
//!
//! Retrieval is fanned out concurrently; decoding, normal estimation and
//! assembly then run in fragment list order, since fragment ordinals drive
//! every index in the merged document.

use crate::error::{Error, Result};
use crate::index::{flatten_fragments, parse_index_document};
use crate::material::{resolve_material, LabelMaterialMap};
use crate::mesh::{decode, estimate_normals};
use crate::source::{fetch_ordered, FragmentSource, LocalSource, RemoteSource};
use gltf_scene::{
    assemble, compute_bounds, json, normal_bytes, reconstruct, FragmentInfo, FragmentNormals,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// `asset.generator` of produced documents
pub const GENERATOR: &str = "ngmesh-gltf";

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Estimate per-vertex normals (default: true)
    pub calculate_normal: bool,
    /// Write normal buffers to this directory instead of embedding them
    pub normal_output: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            calculate_normal: true,
            normal_output: None,
        }
    }
}

/// A retrieved fragment waiting to be decoded
struct FragmentJob {
    uri: String,
    buffer: Vec<u8>,
    material: json::Material,
}

/// Convert a local mesh directory
///
/// Without a label map, every `<label>:0` index document in `dir` is used and
/// all fragments get the default material. Buffer URIs are `dir/<fragment>`,
/// so `dir` should be relative to where the document will be saved.
pub async fn convert_from_local(
    dir: impl Into<PathBuf>,
    labels: Option<&LabelMaterialMap>,
    options: &ConvertOptions,
) -> Result<json::Root> {
    let source = LocalSource::new(dir);
    let locators = source.index_locators(labels).await?;
    convert(FragmentSource::Local(source), locators, labels, options).await
}

/// Convert meshes served under an HTTP root
///
/// A label map is required; each label yields one fetch of `<root>/<label>:0`.
pub async fn convert_from_remote(
    root: &str,
    labels: Option<&LabelMaterialMap>,
    options: &ConvertOptions,
) -> Result<json::Root> {
    let labels = labels.ok_or_else(|| {
        Error::Validation("a label map must be provided for remote conversion".to_string())
    })?;

    let source = RemoteSource::new(root)?;
    let locators = source.index_locators(labels);
    convert(FragmentSource::Remote(source), locators, Some(labels), options).await
}

/// Run the pipeline over the given index documents
pub async fn convert(
    source: FragmentSource,
    index_locators: Vec<String>,
    labels: Option<&LabelMaterialMap>,
    options: &ConvertOptions,
) -> Result<json::Root> {
    tracing::info!("Reading {} index documents", index_locators.len());
    let documents = fetch_ordered(index_locators.len(), |index| {
        let source = source.clone();
        let locator = index_locators[index].clone();
        async move { source.read_index(&locator).await }
    })
    .await?;

    let listed = index_locators
        .into_iter()
        .zip(documents)
        .map(|(locator, bytes)| {
            let fragments = parse_index_document(&locator, &bytes)?;
            Ok((locator, fragments))
        })
        .collect::<Result<Vec<_>>>()?;
    let fragments = flatten_fragments(listed);

    tracing::info!("Fetching {} fragments", fragments.len());
    let buffers = fetch_ordered(fragments.len(), |index| {
        let source = source.clone();
        let fragment = fragments[index].fragment.clone();
        async move { source.read_fragment(&fragment).await }
    })
    .await?;

    let jobs = fragments
        .into_iter()
        .zip(buffers)
        .map(|(fragment, buffer)| {
            Ok(FragmentJob {
                uri: source.fragment_uri(&fragment.fragment),
                buffer,
                material: resolve_material(&fragment.index_locator, labels)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let calculate_normal = options.calculate_normal;
    let mut infos = tokio::task::spawn_blocking(move || summarize_all(jobs, calculate_normal)).await??;

    if calculate_normal {
        if let Some(dir) = &options.normal_output {
            write_normals(dir, &mut infos).await?;
        }
    }

    let fragments = infos
        .iter()
        .enumerate()
        .map(|(ordinal, info)| assemble(info, ordinal as u32, calculate_normal));
    let root = reconstruct(fragments, GENERATOR);

    tracing::info!(
        "Assembled scene: {} nodes, {} accessors, {} buffers",
        root.nodes.len(),
        root.accessors.len(),
        root.buffers.len()
    );
    Ok(root)
}

/// Decode and summarize every fragment, in parallel, keeping list order
fn summarize_all(jobs: Vec<FragmentJob>, calculate_normal: bool) -> Result<Vec<FragmentInfo>> {
    jobs.into_par_iter()
        .map(|job| summarize(job, calculate_normal))
        .collect()
}

fn summarize(job: FragmentJob, calculate_normal: bool) -> Result<FragmentInfo> {
    let mesh = decode(&job.buffer)?;

    let normals = if calculate_normal {
        Some(FragmentNormals::embedded(estimate_normals(
            &mesh.vertices,
            &mesh.faces,
        )?))
    } else {
        None
    };

    tracing::debug!(
        "{}: {} vertices, {} faces",
        job.uri,
        mesh.vertex_count(),
        mesh.face_count()
    );

    Ok(FragmentInfo {
        uri: job.uri,
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count() as u32,
        bounds: compute_bounds(&mesh.vertices),
        normals,
        material: job.material,
    })
}

/// Write each fragment's normals to `dir` and point its normal buffer there
async fn write_normals(dir: &Path, infos: &mut [FragmentInfo]) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    for info in infos.iter_mut() {
        let Some(normals) = info.normals.as_mut() else {
            continue;
        };

        let path = dir.join(normal_file_name(&info.uri));
        tokio::fs::write(&path, normal_bytes(&normals.data))
            .await
            .map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
        normals.external_uri = Some(path.to_string_lossy().into_owned());
    }

    tracing::info!("Wrote {} normal buffers to {:?}", infos.len(), dir);
    Ok(())
}

/// `<fragment-name>.normals.bin`, with `:` replaced so the name is portable
fn normal_file_name(uri: &str) -> String {
    let name = uri.rsplit(['/', '\\']).next().unwrap_or(uri);
    format!("{}.normals.bin", name.replace(':', "_"))
}
