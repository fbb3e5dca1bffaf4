//! The blob store interface consumed by the uploader.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;

/// Trait for blob upload targets.
///
/// This is the minimal surface the upload strategies need: whole-object
/// upload for small assets, and block staging plus block-list commit for
/// chunked uploads. Implementations must be safe to share across concurrent
/// uploads of different blobs.
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Uploads a complete object in a single call.
    async fn put_blob(&self, blob: &str, data: Bytes) -> StoreResult<()>;

    /// Stages one block of a blob under the given block identifier.
    ///
    /// Staged blocks are not visible until committed by `put_block_list`.
    async fn put_block(&self, blob: &str, block_id: &str, data: Bytes) -> StoreResult<()>;

    /// Commits the ordered block list, materializing the blob.
    ///
    /// The store reassembles the object by concatenating staged blocks in
    /// list order. An empty list commits an empty blob.
    async fn put_block_list(&self, blob: &str, block_ids: &[String]) -> StoreResult<()>;
}
