//! Upload strategies: whole-stream, whole-byte-array, and chunked block
//! upload with block-list finalization.

use bytes::Bytes;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

use crate::chunk::plan_blocks;
use crate::error::{UploadError, UploadResult};
use crate::store::BlobSink;

/// How a blob was transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStrategy {
    /// Drained from a reader, then uploaded in one call.
    Stream,
    /// Uploaded from an in-memory byte array in one call.
    Bytes,
    /// Split into blocks and committed via a block list.
    Chunked,
}

/// Outcome of a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadSummary {
    /// Target blob name.
    pub blob: String,
    /// Strategy used for the transfer.
    pub strategy: UploadStrategy,
    /// Total bytes uploaded.
    pub bytes: usize,
    /// Number of blocks committed (0 for whole-object strategies).
    pub blocks: usize,
}

/// Uploads a blob by draining `reader` to memory and issuing one
/// whole-object put.
pub async fn upload_from_stream<R>(
    sink: &dyn BlobSink,
    blob: &str,
    mut reader: R,
) -> UploadResult<UploadSummary>
where
    R: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    upload_bytes_with_strategy(sink, blob, Bytes::from(data), UploadStrategy::Stream).await
}

/// Uploads a blob from an in-memory byte array in one whole-object put.
pub async fn upload_bytes(
    sink: &dyn BlobSink,
    blob: &str,
    data: Bytes,
) -> UploadResult<UploadSummary> {
    upload_bytes_with_strategy(sink, blob, data, UploadStrategy::Bytes).await
}

async fn upload_bytes_with_strategy(
    sink: &dyn BlobSink,
    blob: &str,
    data: Bytes,
    strategy: UploadStrategy,
) -> UploadResult<UploadSummary> {
    let bytes = data.len();
    sink.put_blob(blob, data).await?;
    info!(blob = %blob, bytes, ?strategy, "uploaded blob");
    Ok(UploadSummary {
        blob: blob.to_string(),
        strategy,
        bytes,
        blocks: 0,
    })
}

/// Uploads a blob by splitting `data` into blocks of at most `chunk_size`
/// bytes and committing the ordered block list.
///
/// Blocks are staged in ascending sequence order; the commit list preserves
/// that order, so the materialized blob is byte-for-byte equal to `data`. A
/// zero-length input commits an empty block list, materializing an empty
/// blob.
///
/// On a block failure the upload aborts without committing, leaving any
/// already-staged blocks uncommitted for the store to reap. Dropping the
/// returned future between block puts likewise stops the upload before the
/// commit.
pub async fn upload_chunked(
    sink: &dyn BlobSink,
    blob: &str,
    data: Bytes,
    chunk_size: usize,
) -> UploadResult<UploadSummary> {
    let blocks = plan_blocks(&data, chunk_size)?;
    let mut block_list = Vec::with_capacity(blocks.len());

    for block in &blocks {
        debug!(
            blob = %blob,
            seq = block.seq,
            block_id = %block.id,
            bytes = block.payload.len(),
            "staging block"
        );

        let start = block.seq as usize * chunk_size;
        let payload = data.slice(start..start + block.payload.len());
        sink.put_block(blob, &block.id, payload)
            .await
            .map_err(|source| UploadError::PutBlockFailed {
                seq: block.seq,
                source,
            })?;

        block_list.push(block.id.clone());
    }

    sink.put_block_list(blob, &block_list)
        .await
        .map_err(|source| UploadError::CommitFailed { source })?;

    info!(
        blob = %blob,
        bytes = data.len(),
        blocks = block_list.len(),
        "committed block list"
    );

    Ok(UploadSummary {
        blob: blob.to_string(),
        strategy: UploadStrategy::Chunked,
        bytes: data.len(),
        blocks: block_list.len(),
    })
}
