//! Retrieval of index documents and fragment buffers

mod local;
mod remote;

pub use local::LocalSource;
pub use remote::RemoteSource;

use crate::error::Result;
use std::future::Future;
use tokio::task::JoinSet;

/// Where index documents and fragments come from
#[derive(Debug, Clone)]
pub enum FragmentSource {
    Local(LocalSource),
    Remote(RemoteSource),
}

impl FragmentSource {
    /// Read an index document by the locator `index_locators` produced
    pub async fn read_index(&self, locator: &str) -> Result<Vec<u8>> {
        match self {
            FragmentSource::Local(source) => source.read(locator).await,
            FragmentSource::Remote(source) => source.fetch(locator).await,
        }
    }

    /// Read a fragment buffer named by an index document
    pub async fn read_fragment(&self, fragment: &str) -> Result<Vec<u8>> {
        match self {
            FragmentSource::Local(source) => source.read(fragment).await,
            FragmentSource::Remote(source) => source.fetch(&source.url(fragment)).await,
        }
    }

    /// URI the scene document uses for a fragment buffer
    pub fn fragment_uri(&self, fragment: &str) -> String {
        match self {
            FragmentSource::Local(source) => source.uri(fragment),
            FragmentSource::Remote(source) => source.url(fragment),
        }
    }
}

/// Run `count` retrievals concurrently and return their results in index order
///
/// The first failure is returned; dropping the `JoinSet` aborts the rest.
pub async fn fetch_ordered<F, Fut>(count: usize, fetch: F) -> Result<Vec<Vec<u8>>>
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for index in 0..count {
        let retrieval = fetch(index);
        tasks.spawn(async move { (index, retrieval.await) });
    }

    let mut slots: Vec<Option<Vec<u8>>> = (0..count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        slots[index] = Some(result?);
    }

    Ok(slots.into_iter().flatten().collect())
}
