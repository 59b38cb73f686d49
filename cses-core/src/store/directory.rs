use super::ObjectStore;
use crate::error::{EvalError, Result};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Objects mirrored to a local directory, one file per key.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> DirectoryStore {
        DirectoryStore { root: root.into() }
    }

    /// Map a key to a path below the root. Keys that would escape the
    /// root (absolute or containing `..`) are rejected.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(EvalError::InvalidInput(format!("invalid object key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for DirectoryStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(EvalError::NotFound(key.to_string())),
            Err(e) => Err(EvalError::Retrieval {
                key: key.to_string(),
                reason: format!("{}: {}", path.display(), e),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cses-store-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_reads_nested_keys() {
        let root = scratch_dir("nested");
        let key = "NWIS/NWIS_sites_AL.h5/NWIS_1.csv";
        let path = root.join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, ",Datetime,USGS_flow\n").unwrap();

        let store = DirectoryStore::new(&root);
        assert_eq!(store.get(key).await.unwrap(), b",Datetime,USGS_flow\n".to_vec());
        assert_eq!(
            store.get("NWIS/missing.csv").await.unwrap_err(),
            EvalError::NotFound("NWIS/missing.csv".to_string())
        );
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_rejects_escaping_keys() {
        let store = DirectoryStore::new("/data");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for("/etc/passwd").is_err());
        assert_eq!(
            store.path_for("GeoJSON/StreamStats_AL_4326.geojson").unwrap(),
            PathBuf::from("/data/GeoJSON/StreamStats_AL_4326.geojson")
        );
    }
}
