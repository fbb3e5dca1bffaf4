//! Local asset enumeration.
//!
//! Assets live in a directory and are selected by name suffix. Buffers are
//! owned by the returned resources, so callers can upload them concurrently
//! without shared state.

use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::UploadResult;

/// A named byte buffer loaded from the asset directory.
#[derive(Debug, Clone)]
pub struct Resource {
    /// File name of the asset (no directory components).
    pub name: String,
    /// The asset content.
    pub data: Bytes,
}

/// A directory of upload assets.
#[derive(Debug, Clone)]
pub struct ResourceDir {
    root: PathBuf,
}

impl ResourceDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists the file names in the directory matching `suffix`, sorted.
    async fn names_with_suffix(&self, suffix: &str) -> UploadResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(suffix) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Loads every asset whose name ends with `suffix`, in name order.
    pub async fn load_with_suffix(&self, suffix: &str) -> UploadResult<Vec<Resource>> {
        let mut resources = Vec::new();
        for name in self.names_with_suffix(suffix).await? {
            let data = fs::read(self.root.join(&name)).await?;
            resources.push(Resource {
                name,
                data: Bytes::from(data),
            });
        }
        Ok(resources)
    }

    /// Loads the first asset (in name order) whose name ends with `suffix`.
    pub async fn find_first(&self, suffix: &str) -> UploadResult<Option<Resource>> {
        let Some(name) = self.names_with_suffix(suffix).await?.into_iter().next() else {
            return Ok(None);
        };
        let data = fs::read(self.root.join(&name)).await?;
        Ok(Some(Resource {
            name,
            data: Bytes::from(data),
        }))
    }
}
