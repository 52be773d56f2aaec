//! SSZ root of the `blob_kzg_commitments` list.
//!
//! The ePBS execution payload header does not carry the commitments themselves, only
//! `hash_tree_root(List[KZGCommitment, MAX_BLOB_COMMITMENTS_PER_BLOCK])`. The root must be
//! bit-for-bit identical to what every other consensus client computes, so this follows the
//! SSZ merkleization rules exactly:
//!
//! ```text
//! leaf_i = hash_tree_root(commitment_i)              (48 bytes -> 2 chunks -> 1 hash)
//! leaves = leaf_0 .. leaf_{n-1}, zero .. zero        (padded to 4096 leaves)
//! root   = merkleize(leaves)                         (depth 12)
//! result = sha256(root ++ uint256_le(n))             (mix in length)
//! ```
//!
//! Padding leaves are never materialised: an odd node at any level is paired with the
//! precomputed zero-subtree hash of that level.
//!
//! ## References
//! - SSZ merkleization: `consensus-specs/ssz/simple-serialize.md#merkleization`
//! - Lighthouse: `consensus/types/src/beacon_block_body.rs`

use alloy_primitives::{B256, b256};
use ethereum_hashing::hash32_concat;
use thiserror::Error;
use tree_hash::{Hash256 as TreeHash256, TreeHash, mix_in_length};

use crate::{
    constants::{KZG_COMMITMENTS_TREE_DEPTH, MAX_BLOB_COMMITMENTS_PER_BLOCK},
    kzg::KzgCommitment,
};

/// Root of an empty commitments list: `zero_hash(12)` mixed with length 0.
pub const EMPTY_KZG_COMMITMENTS_ROOT: B256 =
    b256!("dba9671bac9513c9482f1416a53aabd2c6ce90d5a5f865ce5a55c775325c9136");

type Chunk = [u8; 32];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommitmentsRootError {
    #[error("Too many commitments: got {count}, max {max}")]
    TooManyCommitments { count: usize, max: usize },
}

/// Computes `hash_tree_root` of the commitments as an SSZ list bounded by
/// `MAX_BLOB_COMMITMENTS_PER_BLOCK`.
///
/// Order matters: the same commitments in a different order produce a different root.
///
/// ## Errors
///
/// Returns [`CommitmentsRootError::TooManyCommitments`] when the list exceeds the capacity.
pub fn kzg_commitments_root(commitments: &[KzgCommitment]) -> Result<B256, CommitmentsRootError> {
    if commitments.len() > MAX_BLOB_COMMITMENTS_PER_BLOCK {
        return Err(CommitmentsRootError::TooManyCommitments {
            count: commitments.len(),
            max: MAX_BLOB_COMMITMENTS_PER_BLOCK,
        });
    }

    let zero_hashes = zero_hashes::<KZG_COMMITMENTS_TREE_DEPTH>();

    let mut layer: Vec<Chunk> = commitments.iter().map(commitment_leaf).collect();
    for zero in zero_hashes.iter().take(KZG_COMMITMENTS_TREE_DEPTH) {
        if layer.len() % 2 == 1 {
            layer.push(*zero);
        }
        layer = layer.chunks_exact(2).map(|pair| hash32_concat(&pair[0], &pair[1])).collect();
    }

    // An empty list never grows a layer, its tree is the all-zero subtree.
    let tree_root = layer.first().copied().unwrap_or(zero_hashes[KZG_COMMITMENTS_TREE_DEPTH]);

    let mixed = mix_in_length(&TreeHash256::from(tree_root), commitments.len());
    Ok(B256::from_slice(mixed.as_ref()))
}

fn commitment_leaf(commitment: &KzgCommitment) -> Chunk {
    let root = TreeHash::tree_hash_root(commitment);
    let mut leaf = [0u8; 32];
    leaf.copy_from_slice(root.as_ref());
    leaf
}

/// `zero_hashes[i]` is the root of a depth-`i` tree whose leaves are all zero chunks.
fn zero_hashes<const DEPTH: usize>() -> Vec<Chunk> {
    let mut hashes = Vec::with_capacity(DEPTH + 1);
    hashes.push([0u8; 32]);
    for i in 0..DEPTH {
        hashes.push(hash32_concat(&hashes[i], &hashes[i]));
    }
    hashes
}
