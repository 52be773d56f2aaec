//! KZG commitment type carried by execution payloads.
//!
//! The execution layer returns one 48-byte commitment per blob in the payload's blobs bundle.
//! The consensus layer never inspects the curve point; it only hashes the raw bytes into the
//! commitments list root of the ePBS header.

use core::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};

use crate::constants::BYTES_PER_COMMITMENT;

/// A KZG commitment to a single blob.
///
/// The bytes are a compressed BLS12-381 G1 point. No curve validation happens here;
/// the commitment is treated as an opaque fixed-size vector for merkleization.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KzgCommitment(pub [u8; BYTES_PER_COMMITMENT]);

impl KzgCommitment {
    #[inline]
    pub const fn new(bytes: [u8; BYTES_PER_COMMITMENT]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BYTES_PER_COMMITMENT] {
        &self.0
    }

    /// Creates a commitment from a byte slice.
    ///
    /// ## Errors
    ///
    /// Returns an error if the slice is not exactly 48 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() != BYTES_PER_COMMITMENT {
            return Err(format!(
                "Invalid commitment size: expected {} bytes, got {}",
                BYTES_PER_COMMITMENT,
                bytes.len()
            ));
        }

        let mut array = [0u8; BYTES_PER_COMMITMENT];
        array.copy_from_slice(bytes);
        Ok(Self(array))
    }
}

impl fmt::Debug for KzgCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KzgCommitment({self})")
    }
}

impl fmt::Display for KzgCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for KzgCommitment {
    type Err = String;

    /// Parses a hex string, with or without the `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| format!("Invalid commitment hex: {e}"))?;
        Self::from_slice(&bytes)
    }
}

impl TreeHash for KzgCommitment {
    fn tree_hash_type() -> TreeHashType {
        <[u8; BYTES_PER_COMMITMENT] as TreeHash>::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        self.0.tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        <[u8; BYTES_PER_COMMITMENT] as TreeHash>::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        TreeHash::tree_hash_root(&self.0)
    }
}

// Commitments travel as 0x-prefixed hex strings, matching the Engine API and beacon API.
impl Serialize for KzgCommitment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KzgCommitment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
