//! Protocol constants (mainnet preset) shared across Bluewater crates.

/// Number of slots in one epoch.
pub const SLOTS_PER_EPOCH: u64 = 32;

/// The size of a KZG commitment in bytes (compressed BLS12-381 G1 point).
pub const BYTES_PER_COMMITMENT: usize = 48;

/// SSZ list capacity for `blob_kzg_commitments`.
///
/// The capacity, not the actual blob count, fixes the Merkle tree depth of the list root.
pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: usize = 4096;

/// Depth of the commitments list tree: `log2(MAX_BLOB_COMMITMENTS_PER_BLOCK)`.
pub const KZG_COMMITMENTS_TREE_DEPTH: usize =
    MAX_BLOB_COMMITMENTS_PER_BLOCK.next_power_of_two().ilog2() as usize;

/// Locally built headers never charge the proposer.
pub const LOCAL_BUILDER_VALUE: u64 = 0;
