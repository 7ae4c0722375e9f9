//! Index documents (`<label>:0`), listing the fragments of one object

use crate::error::ParseError;
use serde_json::Value;

/// A fragment together with the index document that listed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRef {
    pub index_locator: String,
    pub fragment: String,
}

/// Parse an index document into its fragment locators
///
/// A missing or non-array `fragments` field yields an empty list.
pub fn parse_index_document(locator: &str, bytes: &[u8]) -> Result<Vec<String>, ParseError> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|source| ParseError::IndexDocument {
            locator: locator.to_string(),
            source,
        })?;

    let Some(Value::Array(fragments)) = document.get("fragments") else {
        tracing::debug!("Index document {} lists no fragments", locator);
        return Ok(Vec::new());
    };

    fragments
        .iter()
        .map(|value| match value {
            Value::String(fragment) => Ok(fragment.clone()),
            other => Err(ParseError::FragmentLocator {
                locator: locator.to_string(),
                value: other.clone(),
            }),
        })
        .collect()
}

/// Flatten per-document fragment lists, keeping document then fragment order
pub fn flatten_fragments(documents: Vec<(String, Vec<String>)>) -> Vec<FragmentRef> {
    documents
        .into_iter()
        .flat_map(|(index_locator, fragments)| {
            fragments.into_iter().map(move |fragment| FragmentRef {
                index_locator: index_locator.clone(),
                fragment,
            })
        })
        .collect()
}
