//! Upload error types.

use thiserror::Error;

/// Errors surfaced by a blob store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target container does not exist.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The requested blob does not exist.
    #[error("blob not found: {0}")]
    BlobNotFound(String),

    /// A block identifier was rejected by the store.
    #[error("invalid block id: {0}")]
    InvalidBlockId(String),

    /// The committed block list referenced an unknown block.
    #[error("invalid block list: {0}")]
    InvalidBlockList(String),

    /// An error returned by the Azure Storage service or SDK.
    #[error(transparent)]
    Azure(#[from] azure_core::Error),

    /// Any other store failure.
    #[error("{0}")]
    Other(String),
}

/// Result type for blob store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by upload operations.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload configuration is unusable (e.g. a zero chunk size).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A block upload failed. The upload aborts and no commit is attempted;
    /// blocks staged so far are left to the store's own garbage collection.
    #[error("failed to upload block {seq}: {source}")]
    PutBlockFailed {
        /// Sequence number of the failed block.
        seq: u32,
        #[source]
        source: StoreError,
    },

    /// The block list commit failed after all blocks were staged. The blob
    /// remains absent or in its prior state.
    #[error("failed to commit block list: {source}")]
    CommitFailed {
        #[source]
        source: StoreError,
    },

    /// A local asset could not be read.
    #[error("failed to read resource: {0}")]
    Resource(#[from] std::io::Error),

    /// A store failure outside the chunked path (whole-object uploads,
    /// container management).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
