//! Read-only object stores.
//!
//! The evaluation pipeline only needs "bytes for this key, or not found".
//! [`MemoryStore`] is always available; the directory and HTTP stores need
//! the `api` feature.

#[cfg(feature = "api")]
mod directory;
#[cfg(feature = "api")]
mod http;

#[cfg(feature = "api")]
pub use directory::DirectoryStore;
#[cfg(feature = "api")]
pub use http::HttpStore;

use crate::error::{EvalError, Result};
use std::collections::HashMap;

/// Public bucket holding the NWIS, model and GeoJSON objects.
pub const DEFAULT_BUCKET: &str = "streamflow-app-data";

/// A read-only key to bytes source.
///
/// Implementations return [`EvalError::NotFound`] for absent keys and
/// [`EvalError::Retrieval`] for anything else that goes wrong. They do
/// not retry.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

impl<S: ObjectStore> ObjectStore for &S {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key).await
    }
}

/// An in-memory store, mostly for tests and offline demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.objects.insert(key.into(), body.into());
    }

    pub fn with(mut self, key: impl Into<String>, body: impl Into<Vec<u8>>) -> MemoryStore {
        self.insert(key, body);
        self
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| EvalError::NotFound(key.to_string()))
    }
}
