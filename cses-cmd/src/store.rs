//! Object store selection from command line flags.

use clap::{Args, ValueEnum};
use cses_core::store::{DirectoryStore, HttpStore, ObjectStore, DEFAULT_BUCKET};
use cses_core::Result;
use cses_eval::pipeline::FallbackPolicy;
use log::info;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Public S3 bucket holding the NWIS, model and GeoJSON objects
    #[arg(long, default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Base URL to read objects from, overriding the bucket
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Read objects from a local mirror of the bucket instead of HTTP
    #[arg(long, conflicts_with = "endpoint")]
    pub data_dir: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Which failures switch to the default configuration
    #[arg(long, value_enum, default_value_t = Fallback::Any)]
    pub fallback: Fallback,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Any failure of the requested model
    Any,
    /// Only bad request values and missing objects
    InputOrMissing,
}

impl From<Fallback> for FallbackPolicy {
    fn from(fallback: Fallback) -> Self {
        match fallback {
            Fallback::Any => FallbackPolicy::AnyFailure,
            Fallback::InputOrMissing => FallbackPolicy::InputOrMissing,
        }
    }
}

/// Either of the native stores.
pub enum CliStore {
    Http(HttpStore),
    Directory(DirectoryStore),
}

impl ObjectStore for CliStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        match self {
            CliStore::Http(store) => store.get(key).await,
            CliStore::Directory(store) => store.get(key).await,
        }
    }
}

impl StoreArgs {
    pub fn open(&self) -> anyhow::Result<CliStore> {
        if let Some(dir) = &self.data_dir {
            info!("Reading objects from {}", dir);
            return Ok(CliStore::Directory(DirectoryStore::new(dir)));
        }
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| HttpStore::bucket_endpoint(&self.bucket));
        info!("Reading objects from {}", endpoint);
        let store = HttpStore::with_timeout(endpoint, Duration::from_secs(self.timeout))?;
        Ok(CliStore::Http(store))
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.fallback.into()
    }
}
