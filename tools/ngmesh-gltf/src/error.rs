//! Conversion errors

use std::path::PathBuf;
use thiserror::Error;

/// Malformed input data (fragment buffers or index documents)
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("buffer of {len} bytes is too short for the vertex count header")]
    MissingHeader { len: usize },
    #[error("negative vertex count {0}")]
    NegativeVertexCount(i32),
    #[error("{vertex_count} vertices need {needed} bytes, buffer has {len}")]
    TruncatedVertices {
        vertex_count: u32,
        needed: usize,
        len: usize,
    },
    #[error("face block of {len} bytes is not a multiple of 12")]
    MisalignedFaces { len: usize },
    #[error("face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: u32,
    },
    #[error("invalid index document {locator}: {source}")]
    IndexDocument {
        locator: String,
        source: serde_json::Error,
    },
    #[error("index document {locator} lists a non-string fragment: {value}")]
    FragmentLocator {
        locator: String,
        value: serde_json::Value,
    },
}

/// Any failure that aborts a conversion
#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },
    #[error("HTTP {status} fetching {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
