//! Fragments on the local filesystem

use crate::error::{Error, Result};
use crate::material::LabelMaterialMap;
use std::path::{Path, PathBuf};

/// A mesh directory holding `<label>:0` index documents and fragment files
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Index documents to read
    ///
    /// With a label map, one per label. Without one, every `<label>:0` file
    /// in the directory, ordered by label.
    pub async fn index_locators(&self, labels: Option<&LabelMaterialMap>) -> Result<Vec<String>> {
        if let Some(labels) = labels {
            return Ok(labels.keys().map(|label| format!("{label}:0")).collect());
        }

        let io_error = |source| Error::Io {
            path: self.dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(io_error)?;
        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(label) = index_label(name) {
                found.push((label, name.to_string()));
            }
        }
        found.sort();

        tracing::debug!("Found {} index documents in {:?}", found.len(), self.dir);
        Ok(found.into_iter().map(|(_, name)| name).collect())
    }

    /// Read a file from the mesh directory
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(name);
        tokio::fs::read(&path)
            .await
            .map_err(|source| Error::Io { path, source })
    }

    /// URI a scene document uses to reference `name`
    pub fn uri(&self, name: &str) -> String {
        self.dir.join(name).to_string_lossy().into_owned()
    }
}

/// Label of an index document file name, which is exactly `<digits>:0`
fn index_label(name: &str) -> Option<u64> {
    let digits = name.strip_suffix(":0")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
