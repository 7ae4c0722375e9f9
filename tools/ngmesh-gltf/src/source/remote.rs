//! Fragments served over HTTP

use crate::error::{Error, Result};
use crate::material::LabelMaterialMap;

/// An HTTP root serving `<label>:0` index documents and fragment files
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    root: String,
}

impl RemoteSource {
    pub fn new(root: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|source| Error::Network {
                url: root.to_string(),
                source,
            })?;
        Ok(Self::with_client(client, root))
    }

    pub fn with_client(client: reqwest::Client, root: &str) -> Self {
        Self {
            client,
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// One index document URL per label
    pub fn index_locators(&self, labels: &LabelMaterialMap) -> Vec<String> {
        labels
            .keys()
            .map(|label| self.url(&format!("{label}:0")))
            .collect()
    }

    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.root, name)
    }

    /// GET `url`, failing on transport errors and on status >= 400
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let network_error = |source| Error::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network_error)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(Error::Http {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await.map_err(network_error)?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
