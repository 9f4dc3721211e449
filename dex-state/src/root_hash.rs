use core::fmt;

use borsh::BorshSerialize;
use sha2::Digest;

use crate::DexState;

/// The ledger's state commitment: a SHA-256 digest over the canonical borsh
/// encoding of [`DexState`]. Two structurally equal states always produce
/// the same digest, on every node.
#[derive(
    borsh::BorshDeserialize, borsh::BorshSerialize, Debug, PartialEq, Eq, Clone, Copy, Hash,
)]
pub struct RootHash(pub [u8; 32]);

impl AsRef<[u8]> for RootHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RootHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl serde::Serialize for RootHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(self.0))
        } else {
            serde::Serialize::serialize(&self.0, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for RootHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex_str: String = serde::Deserialize::deserialize(deserializer)?;
            let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
            let hash: [u8; 32] = bytes
                .try_into()
                .map_err(|_| serde::de::Error::custom("RootHash must be 32 bytes"))?;
            Ok(RootHash(hash))
        } else {
            let hash = <[u8; 32] as serde::Deserialize>::deserialize(deserializer)?;
            Ok(RootHash(hash))
        }
    }
}

impl DexState {
    /// Computes the root hash of this state snapshot.
    ///
    /// The canonical byte form is the borsh encoding: fixed field order,
    /// little-endian fixed-width integers, accounts length-prefixed in
    /// insertion order. No float, locale, or map-iteration dependence.
    pub fn root_hash(&self) -> RootHash {
        let bytes = self
            .try_to_vec()
            .expect("serializing to an in-memory buffer is infallible");
        RootHash(sha2::Sha256::digest(&bytes).into())
    }
}
