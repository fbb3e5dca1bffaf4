//! Uploader configuration.

use clap::Parser;
use std::path::PathBuf;

/// Default account name for development storage.
pub const DEFAULT_ACCOUNT: &str = "devstoreaccount1";

/// Default connection string, targeting a local storage emulator.
pub const DEFAULT_CONNECTION_STRING: &str = "DefaultEndpointsProtocol=http;AccountName=devstoreaccount1;AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;BlobEndpoint=http://127.0.0.1:10000/devstoreaccount1;";

/// Default target container.
pub const DEFAULT_CONTAINER: &str = "testimages";

/// Default block size for chunked uploads (250 KB).
pub const DEFAULT_CHUNK_SIZE: usize = 250 * 1024;

/// Name suffix selecting image assets.
pub const IMAGE_SUFFIX: &str = ".jpg";

/// Name suffix selecting the large video asset.
pub const VIDEO_SUFFIX: &str = ".mp4";

/// Command-line arguments for the uploader.
#[derive(Parser, Debug, Clone)]
#[command(name = "blobup")]
#[command(about = "Chunked Azure Blob Storage asset uploader")]
#[command(version)]
pub struct Args {
    /// Azure Storage connection string.
    #[arg(long, env = "AZURE_STORAGE_CONNECTION_STRING", default_value = DEFAULT_CONNECTION_STRING)]
    pub connection_string: String,

    /// Target container name.
    #[arg(long, default_value = DEFAULT_CONTAINER)]
    pub container: String,

    /// Directory holding the assets to upload.
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Block size in bytes for the chunked upload.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Keep existing blobs instead of clearing the container first.
    #[arg(long)]
    pub keep_existing: bool,

    /// Print the upload report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Enable silent mode (minimal logging).
    #[arg(long, short = 's')]
    pub silent: bool,
}

/// Uploader configuration derived from command-line arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Azure Storage connection string.
    pub connection_string: String,
    /// Target container name.
    pub container: String,
    /// Directory holding the assets to upload.
    pub assets: PathBuf,
    /// Block size in bytes for the chunked upload.
    pub chunk_size: usize,
    /// Keep existing blobs instead of clearing the container first.
    pub keep_existing: bool,
    /// Print the upload report as JSON.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection_string: DEFAULT_CONNECTION_STRING.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            assets: PathBuf::from("assets"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            keep_existing: false,
            json: false,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            connection_string: args.connection_string,
            container: args.container,
            assets: args.assets,
            chunk_size: args.chunk_size,
            keep_existing: args.keep_existing,
            json: args.json,
        }
    }
}
