//! Blobup: chunked Azure Blob Storage asset uploader.
//!
//! Uploads binary assets to a blob container using three strategies:
//! whole-stream puts, whole-byte-array puts, and chunked block upload with
//! block-list finalization for large files.
//!
//! # Example
//!
//! ```
//! use blobup::{upload_chunked, MemoryBlobStore};
//! use bytes::Bytes;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), blobup::UploadError> {
//!     let store = MemoryBlobStore::new();
//!     let video = Bytes::from(vec![0u8; 600_000]);
//!     let summary = upload_chunked(&store, "video.mp4", video, 250 * 1024).await?;
//!     assert_eq!(summary.blocks, 3);
//!     Ok(())
//! }
//! ```

pub mod chunk;
pub mod config;
pub mod error;
pub mod resources;
pub mod store;
pub mod uploader;

// Re-exports for convenience
pub use chunk::{block_count, block_id, plan_blocks, Block, MAX_BLOCK_COUNT};
pub use config::{Args, Config, DEFAULT_CHUNK_SIZE, DEFAULT_CONTAINER};
pub use error::{StoreError, StoreResult, UploadError, UploadResult};
pub use store::{AzureBlobStore, BlobSink, MemoryBlobStore};
pub use uploader::{
    upload_bytes, upload_chunked, upload_from_stream, UploadStrategy, UploadSummary,
};
