//! ngmesh-gltf - precomputed mesh to glTF converter
//!
//! Reads `<label>:0` index documents and their binary fragments from a local
//! directory or an HTTP root and writes one .gltf scene.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use ngmesh_gltf::manifest::{load_manifest, Manifest};
use ngmesh_gltf::mesh::{decode, invert_faces};
use ngmesh_gltf::{convert_from_local, convert_from_remote, json, ConvertOptions, LabelMaterialMap};

#[derive(Parser)]
#[command(name = "ngmesh-gltf")]
#[command(about = "Precomputed mesh to glTF converter")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a local mesh directory
    Local {
        /// Directory holding index documents and fragments
        dir: PathBuf,

        /// Label manifest (labels.toml); all index documents if omitted
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        #[command(flatten)]
        convert: ConvertArgs,
    },

    /// Convert meshes served over HTTP
    Remote {
        /// Root URL serving index documents and fragments
        url: String,

        /// Label manifest (labels.toml)
        #[arg(short, long)]
        manifest: PathBuf,

        #[command(flatten)]
        convert: ConvertArgs,
    },

    /// Reverse the face winding of a fragment file
    Invert {
        /// Input fragment file
        input: PathBuf,

        /// Output file (default: <input>.inverted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print vertex/face counts and bounds of a fragment file
    Info {
        /// Input fragment file
        input: PathBuf,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Output .gltf file
    #[arg(short, long, default_value = "scene.gltf")]
    output: PathBuf,

    /// Skip normal estimation (overrides manifest)
    #[arg(long)]
    no_normals: bool,

    /// Write normal buffers to this directory instead of embedding them
    #[arg(long)]
    normal_output: Option<PathBuf>,
}

impl ConvertArgs {
    fn options(&self, manifest: &Manifest) -> ConvertOptions {
        let mut options = manifest.convert_options();
        if self.no_normals {
            options.calculate_normal = false;
        }
        if let Some(dir) = &self.normal_output {
            options.normal_output = Some(dir.clone());
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Local {
            dir,
            manifest,
            convert,
        } => {
            let manifest = match manifest {
                Some(path) => load_manifest(&path)?,
                None => Manifest::default(),
            };
            let labels = manifest.label_map()?;
            let options = convert.options(&manifest);

            tracing::info!("Converting {:?} -> {:?}", dir, convert.output);
            let root = block_on(convert_from_local(dir, labels.as_ref(), &options))??;
            write_document(&root, &convert.output)?;
            tracing::info!("Done!");
        }

        Commands::Remote {
            url,
            manifest,
            convert,
        } => {
            let manifest = load_manifest(&manifest)?;
            let labels: Option<LabelMaterialMap> = manifest.label_map()?;
            let options = convert.options(&manifest);

            tracing::info!("Converting {} -> {:?}", url, convert.output);
            let root = block_on(convert_from_remote(&url, labels.as_ref(), &options))??;
            write_document(&root, &convert.output)?;
            tracing::info!("Done!");
        }

        Commands::Invert { input, output } => {
            let output = output.unwrap_or_else(|| {
                let mut name = input.clone().into_os_string();
                name.push(".inverted");
                PathBuf::from(name)
            });
            tracing::info!("Inverting {:?} -> {:?}", input, output);

            let buffer =
                std::fs::read(&input).with_context(|| format!("Failed to read {:?}", input))?;
            let inverted = invert_faces(&buffer)
                .with_context(|| format!("Failed to invert faces of {:?}", input))?;
            std::fs::write(&output, inverted)
                .with_context(|| format!("Failed to write {:?}", output))?;
            tracing::info!("Done!");
        }

        Commands::Info { input } => {
            let buffer =
                std::fs::read(&input).with_context(|| format!("Failed to read {:?}", input))?;
            let mesh = decode(&buffer).with_context(|| format!("Failed to decode {:?}", input))?;
            let bounds = gltf_scene::compute_bounds(&mesh.vertices);

            tracing::info!(
                "{:?}: {} vertices, {} faces, bounds {:?}..{:?}",
                input,
                mesh.vertex_count(),
                mesh.face_count(),
                bounds.min,
                bounds.max
            );
        }
    }

    Ok(())
}

/// Drive a conversion on a fresh multi-threaded runtime
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;
    Ok(rt.block_on(future))
}

fn write_document(root: &json::Root, output: &Path) -> Result<()> {
    let text = json::serialize::to_string_pretty(root).context("Failed to serialize glTF")?;
    std::fs::write(output, text).with_context(|| format!("Failed to write {:?}", output))?;
    Ok(())
}
