//! Upload strategy tests against the in-memory store.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use rand::RngCore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use blobup::{
    upload_bytes, upload_chunked, upload_from_stream, BlobSink, MemoryBlobStore, StoreError,
    StoreResult, UploadError, UploadStrategy,
};

fn random_bytes(len: usize) -> Bytes {
    let mut data = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut data);
    Bytes::from(data)
}

/// Sink wrapper that records block puts and committed block lists, and can
/// fail one configured put.
struct RecordingSink {
    inner: MemoryBlobStore,
    fail_at: Option<usize>,
    puts: AtomicUsize,
    commits: AtomicUsize,
    staged_ids: Mutex<Vec<String>>,
    committed_ids: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self::failing_at(None)
    }

    fn failing_at(fail_at: Option<usize>) -> Self {
        Self {
            inner: MemoryBlobStore::new(),
            fail_at,
            puts: AtomicUsize::new(0),
            commits: AtomicUsize::new(0),
            staged_ids: Mutex::new(Vec::new()),
            committed_ids: Mutex::new(Vec::new()),
        }
    }

    fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobSink for RecordingSink {
    async fn put_blob(&self, blob: &str, data: Bytes) -> StoreResult<()> {
        self.inner.put_blob(blob, data).await
    }

    async fn put_block(&self, blob: &str, block_id: &str, data: Bytes) -> StoreResult<()> {
        let n = self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(n) {
            return Err(StoreError::Other("injected block failure".to_string()));
        }
        self.staged_ids.lock().unwrap().push(block_id.to_string());
        self.inner.put_block(blob, block_id, data).await
    }

    async fn put_block_list(&self, blob: &str, block_ids: &[String]) -> StoreResult<()> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        *self.committed_ids.lock().unwrap() = block_ids.to_vec();
        self.inner.put_block_list(blob, block_ids).await
    }
}

fn decode_seq(block_id: &str) -> u32 {
    let bytes = BASE64.decode(block_id).unwrap();
    u32::from_be_bytes(bytes.try_into().unwrap())
}

#[tokio::test]
async fn chunked_upload_materializes_exact_bytes() {
    let store = MemoryBlobStore::new();
    let data = random_bytes(600_000);

    let summary = upload_chunked(&store, "video.mp4", data.clone(), 250 * 1024)
        .await
        .unwrap();

    assert_eq!(summary.strategy, UploadStrategy::Chunked);
    assert_eq!(summary.bytes, 600_000);
    assert_eq!(summary.blocks, 3);
    assert_eq!(store.content("video.mp4").unwrap(), data);
    assert_eq!(store.staged_count("video.mp4"), 0);
}

#[tokio::test]
async fn chunked_upload_exact_multiple_is_one_block() {
    let store = MemoryBlobStore::new();
    let data = random_bytes(256_000);

    let summary = upload_chunked(&store, "exact.bin", data.clone(), 256_000)
        .await
        .unwrap();

    assert_eq!(summary.blocks, 1);
    assert_eq!(store.content("exact.bin").unwrap(), data);
}

#[tokio::test]
async fn chunked_upload_empty_input_commits_empty_blob() {
    let sink = RecordingSink::new();

    let summary = upload_chunked(&sink, "empty.bin", Bytes::new(), 256_000)
        .await
        .unwrap();

    assert_eq!(summary.blocks, 0);
    assert_eq!(sink.put_count(), 0);
    assert_eq!(sink.commit_count(), 1);
    assert!(sink.committed_ids.lock().unwrap().is_empty());

    let blob = sink.inner.content("empty.bin").unwrap();
    assert!(blob.is_empty());
}

#[tokio::test]
async fn commit_list_preserves_sequence_order() {
    let sink = RecordingSink::new();
    let data = random_bytes(10_000);

    upload_chunked(&sink, "ordered.bin", data, 1_000).await.unwrap();

    let committed = sink.committed_ids.lock().unwrap().clone();
    assert_eq!(committed.len(), 10);
    assert_eq!(committed, *sink.staged_ids.lock().unwrap());

    let seqs: Vec<u32> = committed.iter().map(|id| decode_seq(id)).collect();
    assert_eq!(seqs, (0..10).collect::<Vec<u32>>());

    // Pairwise distinct identifiers.
    let mut deduped = committed.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), committed.len());
}

#[tokio::test]
async fn failed_block_aborts_without_commit() {
    // Second of three blocks fails.
    let sink = RecordingSink::failing_at(Some(1));
    let data = random_bytes(600_000);

    let err = upload_chunked(&sink, "video.mp4", data, 250 * 1024)
        .await
        .unwrap_err();

    match err {
        UploadError::PutBlockFailed { seq, .. } => assert_eq!(seq, 1),
        other => panic!("expected PutBlockFailed, got {:?}", other),
    }

    assert_eq!(sink.commit_count(), 0);
    assert!(sink.inner.content("video.mp4").is_none());
    // The first block stays staged but uncommitted.
    assert_eq!(sink.inner.staged_count("video.mp4"), 1);
}

#[tokio::test]
async fn zero_chunk_size_is_rejected_before_any_put() {
    let sink = RecordingSink::new();

    let err = upload_chunked(&sink, "bad.bin", random_bytes(100), 0)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::InvalidConfig(_)));
    assert_eq!(sink.put_count(), 0);
    assert_eq!(sink.commit_count(), 0);
}

#[tokio::test]
async fn stream_upload_puts_whole_object() {
    let store = MemoryBlobStore::new();
    let data = random_bytes(4_096);

    let summary = upload_from_stream(&store, "stream_photo.jpg", data.as_ref())
        .await
        .unwrap();

    assert_eq!(summary.strategy, UploadStrategy::Stream);
    assert_eq!(summary.blocks, 0);
    assert_eq!(store.content("stream_photo.jpg").unwrap(), data);
}

#[tokio::test]
async fn byte_array_upload_puts_whole_object() {
    let store = MemoryBlobStore::new();
    let data = random_bytes(4_096);

    let summary = upload_bytes(&store, "array_photo.jpg", data.clone())
        .await
        .unwrap();

    assert_eq!(summary.strategy, UploadStrategy::Bytes);
    assert_eq!(store.content("array_photo.jpg").unwrap(), data);
}

#[tokio::test]
async fn concurrent_uploads_to_different_blobs_are_independent() {
    let store = std::sync::Arc::new(MemoryBlobStore::new());
    let first = random_bytes(300_000);
    let second = random_bytes(500_000);

    let a = {
        let store = store.clone();
        let data = first.clone();
        tokio::spawn(async move { upload_chunked(&*store, "a.bin", data, 64 * 1024).await })
    };
    let b = {
        let store = store.clone();
        let data = second.clone();
        tokio::spawn(async move { upload_chunked(&*store, "b.bin", data, 64 * 1024).await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    assert_eq!(store.blob_names(), vec!["a.bin", "b.bin"]);
    assert_eq!(store.content("a.bin").unwrap(), first);
    assert_eq!(store.content("b.bin").unwrap(), second);
}
