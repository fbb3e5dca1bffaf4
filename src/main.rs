//! Blobup: uploads image and video assets to an Azure Blob Storage
//! container, exercising stream, byte-array, and chunked block uploads.

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use blobup::config::{IMAGE_SUFFIX, VIDEO_SUFFIX};
use blobup::resources::ResourceDir;
use blobup::{
    upload_bytes, upload_chunked, upload_from_stream, Args, AzureBlobStore, Config, UploadSummary,
};

/// Report of one full upload run.
#[derive(Debug, Serialize)]
struct UploadReport {
    container: String,
    uploads: Vec<UploadSummary>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug {
        Level::DEBUG
    } else if args.silent {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config = Config::from(args);

    // Connect to the storage account and container
    let store =
        AzureBlobStore::from_connection_string(&config.connection_string, &config.container)?;
    store.ensure_container().await?;

    // Remove existing blobs unless asked to keep them
    if !config.keep_existing {
        store.clear_container().await?;
    }

    let assets = ResourceDir::new(&config.assets);
    let images = assets.load_with_suffix(IMAGE_SUFFIX).await?;
    let mut uploads = Vec::new();

    // Upload images with whole-stream puts
    for image in &images {
        let blob = format!("stream_{}", image.name);
        uploads.push(upload_from_stream(&store, &blob, image.data.as_ref()).await?);
    }

    // Upload images again directly from byte arrays
    for image in &images {
        let blob = format!("array_{}", image.name);
        uploads.push(upload_bytes(&store, &blob, image.data.clone()).await?);
    }

    // Upload the large video in chunks and commit the block list
    match assets.find_first(VIDEO_SUFFIX).await? {
        Some(video) => {
            uploads.push(
                upload_chunked(&store, &video.name, video.data, config.chunk_size).await?,
            );
        }
        None => warn!(dir = %assets.root().display(), "no video asset found"),
    }

    let report = UploadReport {
        container: config.container.clone(),
        uploads,
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let total: usize = report.uploads.iter().map(|u| u.bytes).sum();
        info!(
            container = %report.container,
            uploads = report.uploads.len(),
            total_bytes = total,
            "upload run complete"
        );
    }

    Ok(())
}
