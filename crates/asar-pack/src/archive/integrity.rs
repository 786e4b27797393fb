//! Block-chunked SHA-256 integrity records.
//!
//! Readers verify a member either as a whole (`hash`) or block by block
//! (`blocks`), so both are stored.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Algorithm tag written into every integrity record.
pub const ALGORITHM: &str = "SHA256";

/// Size of one integrity block (4 MiB).
pub const BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Integrity record of one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Integrity {
    /// Always [`ALGORITHM`]
    pub algorithm: String,
    /// Hex digest of the whole source
    pub hash: String,
    /// Always [`BLOCK_SIZE`]
    pub block_size: u64,
    /// Hex digest per block, in order
    pub blocks: Vec<String>,
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute the integrity record of `source`.
///
/// Full blocks are taken while strictly more than one block remains, then the
/// remainder forms the final block. An empty source therefore has one block
/// (the empty digest), and a source of exactly `k` blocks has `k` blocks with
/// no empty trailer.
pub fn compute(source: &[u8]) -> Integrity {
    let mut blocks = Vec::with_capacity(source.len() / BLOCK_SIZE + 1);

    let mut pos = 0;
    while pos + BLOCK_SIZE < source.len() {
        blocks.push(sha256_hex(&source[pos..pos + BLOCK_SIZE]));
        pos += BLOCK_SIZE;
    }
    blocks.push(sha256_hex(&source[pos..]));

    let hash = if blocks.len() == 1 {
        blocks[0].clone()
    } else {
        sha256_hex(source)
    };

    tracing::trace!(bytes = source.len(), blocks = blocks.len(), "computed integrity");

    Integrity {
        algorithm: ALGORITHM.to_string(),
        hash,
        block_size: BLOCK_SIZE as u64,
        blocks,
    }
}
