//! Azure Blob Storage implementation of the blob sink.

use async_trait::async_trait;
use azure_storage::{CloudLocation, ConnectionString, StorageCredentials};
use azure_storage_blobs::blob::{BlobBlockType, BlockList};
use azure_storage_blobs::prelude::{ClientBuilder, ContainerClient, PublicAccess};
use bytes::Bytes;
use futures::StreamExt;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::BlobSink;

/// Blob sink backed by an Azure Blob Storage container.
pub struct AzureBlobStore {
    container: ContainerClient,
    container_name: String,
}

impl AzureBlobStore {
    /// Creates a store from an Azure Storage connection string.
    ///
    /// A `BlobEndpoint` in the connection string (e.g. a local emulator
    /// endpoint) takes precedence over the default cloud endpoint.
    pub fn from_connection_string(connection_string: &str, container: &str) -> StoreResult<Self> {
        let parsed = ConnectionString::new(connection_string)?;
        let account = parsed
            .account_name
            .ok_or_else(|| StoreError::Other("connection string has no AccountName".to_string()))?
            .to_string();
        let credentials = parsed.storage_credentials()?;

        let builder = match parsed.blob_endpoint {
            Some(endpoint) => ClientBuilder::with_location(
                CloudLocation::Custom {
                    account,
                    uri: endpoint.trim_end_matches('/').to_string(),
                },
                credentials,
            ),
            None => ClientBuilder::new(account, credentials),
        };

        Ok(Self {
            container: builder.container_client(container),
            container_name: container.to_string(),
        })
    }

    /// Creates a store for the default cloud endpoint from account name and
    /// access key.
    pub fn with_access_key(account: &str, key: &str, container: &str) -> Self {
        let credentials = StorageCredentials::access_key(account.to_string(), key.to_string());
        Self {
            container: ClientBuilder::new(account.to_string(), credentials)
                .container_client(container),
            container_name: container.to_string(),
        }
    }

    /// Returns the name of the target container.
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// Creates the target container if it does not already exist.
    pub async fn ensure_container(&self) -> StoreResult<()> {
        if self.container.get_properties().await.is_ok() {
            debug!(container = %self.container_name, "container already exists");
            return Ok(());
        }

        self.container
            .create()
            .public_access(PublicAccess::None)
            .await?;
        info!(container = %self.container_name, "created container");
        Ok(())
    }

    /// Deletes every blob currently in the container.
    pub async fn clear_container(&self) -> StoreResult<()> {
        let mut names = Vec::new();
        let mut pages = self.container.list_blobs().into_stream();
        while let Some(page) = pages.next().await {
            let page = page?;
            for blob in page.blobs.blobs() {
                names.push(blob.name.clone());
            }
        }

        for name in &names {
            self.container.blob_client(name).delete().await?;
            debug!(blob = %name, "deleted existing blob");
        }

        info!(
            container = %self.container_name,
            deleted = names.len(),
            "cleared container"
        );
        Ok(())
    }
}

#[async_trait]
impl BlobSink for AzureBlobStore {
    async fn put_blob(&self, blob: &str, data: Bytes) -> StoreResult<()> {
        self.container.blob_client(blob).put_block_blob(data).await?;
        Ok(())
    }

    async fn put_block(&self, blob: &str, block_id: &str, data: Bytes) -> StoreResult<()> {
        self.container
            .blob_client(blob)
            .put_block(block_id.to_string(), data)
            .await?;
        Ok(())
    }

    async fn put_block_list(&self, blob: &str, block_ids: &[String]) -> StoreResult<()> {
        let block_list = BlockList {
            blocks: block_ids
                .iter()
                .map(|id| BlobBlockType::new_uncommitted(id.clone()))
                .collect(),
        };

        self.container
            .blob_client(blob)
            .put_block_list(block_list)
            .await?;
        Ok(())
    }
}
