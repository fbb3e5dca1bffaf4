//! In-memory blob sink.
//!
//! Mirrors the block-blob lifecycle of the real service: blocks are staged
//! under their identifiers, invisible until a block list commits them, and a
//! commit clears the staging area. The test suite drives uploads against
//! this store and inspects the committed bytes.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use md5::{Digest, Md5};

use crate::error::{StoreError, StoreResult};
use crate::store::BlobSink;

/// A committed blob.
#[derive(Debug, Clone)]
pub struct BlobEntry {
    /// The committed content.
    pub content: Bytes,
    /// Base64 MD5 of the content.
    pub etag: String,
    /// Length of the committed block list (0 for whole-object puts).
    pub block_count: usize,
    /// Commit time.
    pub last_modified: DateTime<Utc>,
}

/// In-memory implementation of [`BlobSink`].
#[derive(Default)]
pub struct MemoryBlobStore {
    /// Staged blocks keyed by (blob name, block id).
    staged: DashMap<(String, String), Bytes>,
    /// Committed blobs keyed by blob name.
    blobs: DashMap<String, BlobEntry>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed content of a blob, if any.
    pub fn content(&self, blob: &str) -> Option<Bytes> {
        self.blobs.get(blob).map(|e| e.content.clone())
    }

    /// Returns the committed entry for a blob, if any.
    pub fn entry(&self, blob: &str) -> Option<BlobEntry> {
        self.blobs.get(blob).map(|e| e.clone())
    }

    /// Returns the names of all committed blobs, sorted.
    pub fn blob_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blobs.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Returns the number of blocks currently staged for a blob.
    pub fn staged_count(&self, blob: &str) -> usize {
        self.staged.iter().filter(|e| e.key().0 == blob).count()
    }

    fn clear_staged(&self, blob: &str) {
        self.staged.retain(|(b, _), _| b != blob);
    }

    fn etag_for(content: &[u8]) -> String {
        BASE64.encode(Md5::digest(content))
    }
}

#[async_trait]
impl BlobSink for MemoryBlobStore {
    async fn put_blob(&self, blob: &str, data: Bytes) -> StoreResult<()> {
        let entry = BlobEntry {
            etag: Self::etag_for(&data),
            content: data,
            block_count: 0,
            last_modified: Utc::now(),
        };
        self.blobs.insert(blob.to_string(), entry);
        // A whole-object put discards any blocks staged for the blob.
        self.clear_staged(blob);
        Ok(())
    }

    async fn put_block(&self, blob: &str, block_id: &str, data: Bytes) -> StoreResult<()> {
        // Block IDs must be base64 encoded and <= 64 bytes when decoded.
        let decoded = BASE64
            .decode(block_id)
            .map_err(|_| StoreError::InvalidBlockId(block_id.to_string()))?;
        if decoded.len() > 64 {
            return Err(StoreError::InvalidBlockId(block_id.to_string()));
        }

        self.staged
            .insert((blob.to_string(), block_id.to_string()), data);
        Ok(())
    }

    async fn put_block_list(&self, blob: &str, block_ids: &[String]) -> StoreResult<()> {
        let mut content = BytesMut::new();
        for block_id in block_ids {
            let staged = self
                .staged
                .get(&(blob.to_string(), block_id.clone()))
                .ok_or_else(|| {
                    StoreError::InvalidBlockList(format!("block {} not found", block_id))
                })?;
            content.extend_from_slice(&staged);
        }

        let content = content.freeze();
        let entry = BlobEntry {
            etag: Self::etag_for(&content),
            content,
            block_count: block_ids.len(),
            last_modified: Utc::now(),
        };
        self.blobs.insert(blob.to_string(), entry);
        self.clear_staged(blob);
        Ok(())
    }
}
