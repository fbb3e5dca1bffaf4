//! Block planning and identifier encoding for chunked uploads.
//!
//! Splitting a byte sequence into blocks and deriving block identifiers is
//! purely computational; all network I/O lives in the uploader and the store.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{UploadError, UploadResult};

/// Maximum number of blocks that may be committed to a single block blob.
pub const MAX_BLOCK_COUNT: usize = 50_000;

/// A contiguous slice of the input scheduled for upload as one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Zero-based position of the block within the upload.
    pub seq: u32,
    /// Base64 block identifier derived from `seq`.
    pub id: String,
    /// The block payload. At most `chunk_size` bytes; only the final block
    /// may be shorter.
    pub payload: &'a [u8],
}

/// Encodes a block sequence number as a block identifier.
///
/// The identifier is the base64 form of the fixed-width big-endian bytes of
/// the sequence number, so identifiers are equal-length and collision-free.
/// Reassembly order is carried by the committed block list, never by
/// decoding or comparing identifier text.
pub fn block_id(seq: u32) -> String {
    BASE64.encode(seq.to_be_bytes())
}

/// Returns the number of blocks a sequence of `len` bytes splits into.
pub fn block_count(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size)
}

/// Partitions `data` into ordered blocks of at most `chunk_size` bytes.
///
/// Every block except the last is exactly `chunk_size` bytes; concatenating
/// the payloads in order reproduces `data` with no gaps or overlaps. A
/// zero-length input yields an empty plan.
pub fn plan_blocks(data: &[u8], chunk_size: usize) -> UploadResult<Vec<Block<'_>>> {
    if chunk_size == 0 {
        return Err(UploadError::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    let count = block_count(data.len(), chunk_size);
    if count > MAX_BLOCK_COUNT {
        return Err(UploadError::InvalidConfig(format!(
            "{} bytes at chunk size {} would need {} blocks, exceeding the {} block limit",
            data.len(),
            chunk_size,
            count,
            MAX_BLOCK_COUNT
        )));
    }

    Ok(data
        .chunks(chunk_size)
        .enumerate()
        .map(|(seq, payload)| {
            let seq = seq as u32;
            Block {
                seq,
                id: block_id(seq),
                payload,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_partition_input_exactly() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        for chunk_size in [1, 7, 100, 999, 100_000, 100_001] {
            let blocks = plan_blocks(&data, chunk_size).unwrap();
            let rebuilt: Vec<u8> = blocks.iter().flat_map(|b| b.payload.iter().copied()).collect();
            assert_eq!(rebuilt, data, "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn block_count_matches_ceil_division() {
        assert_eq!(block_count(0, 256_000), 0);
        assert_eq!(block_count(1, 256_000), 1);
        assert_eq!(block_count(256_000, 256_000), 1);
        assert_eq!(block_count(256_001, 256_000), 2);
        assert_eq!(block_count(600_000, 256_000), 3);
    }

    #[test]
    fn video_sized_input_splits_into_three_blocks() {
        let data = vec![0xabu8; 600_000];
        let blocks = plan_blocks(&data, 250 * 1024).unwrap();
        let sizes: Vec<usize> = blocks.iter().map(|b| b.payload.len()).collect();
        assert_eq!(sizes, vec![256_000, 256_000, 88_000]);
        assert_eq!(blocks[2].seq, 2);
    }

    #[test]
    fn exact_multiple_yields_full_final_block() {
        let data = vec![1u8; 256_000];
        let blocks = plan_blocks(&data, 256_000).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].payload.len(), 256_000);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        let blocks = plan_blocks(&[], 256_000).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = plan_blocks(&[1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, UploadError::InvalidConfig(_)));
    }

    #[test]
    fn block_limit_is_enforced() {
        // 50_001 one-byte blocks.
        let data = vec![0u8; MAX_BLOCK_COUNT + 1];
        let err = plan_blocks(&data, 1).unwrap_err();
        assert!(matches!(err, UploadError::InvalidConfig(_)));
        assert!(plan_blocks(&data[..MAX_BLOCK_COUNT], 1).is_ok());
    }

    #[test]
    fn identifiers_are_fixed_width_and_distinct() {
        let ids: Vec<String> = (0..1000).map(block_id).collect();
        let width = ids[0].len();
        assert!(ids.iter().all(|id| id.len() == width));

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn identifier_encodes_fixed_width_sequence_bytes() {
        let decoded = BASE64.decode(block_id(258)).unwrap();
        assert_eq!(decoded, 258u32.to_be_bytes());
        assert_eq!(decoded.len(), 4);
    }
}
