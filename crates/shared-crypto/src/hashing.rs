//! # Domain-Separated Hashing
//!
//! The commitment tree, slot-index derivation and payer authorization all
//! hash through the `DomainHasher` capability. The protocol never names a
//! concrete algorithm, so unit tests can inject a cheap deterministic stub.
//!
//! ## Domains
//!
//! | Domain | Tag | Preimage |
//! |--------|-----|----------|
//! | `Leaf` | `0x00` | leaf value (32 bytes) |
//! | `Node` | `0x01` | left child, right child |
//! | `SlotIndex` | `0x02` | public identity, epoch (big-endian) |
//! | `Authorization` | `0x03` | snapshot epoch, new root, total amount |

use shared_types::Hash;
use sha3::{Digest, Keccak256};

/// Context tag prefixed to every preimage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Commitment-tree leaf.
    Leaf,
    /// Commitment-tree inner node.
    Node,
    /// Slot-index derivation.
    SlotIndex,
    /// Payer authorization message.
    Authorization,
}

impl HashDomain {
    /// Tag byte written before the preimage.
    pub fn tag(self) -> u8 {
        match self {
            HashDomain::Leaf => 0x00,
            HashDomain::Node => 0x01,
            HashDomain::SlotIndex => 0x02,
            HashDomain::Authorization => 0x03,
        }
    }
}

/// Injected collision-resistant hash capability.
pub trait DomainHasher: Send + Sync {
    /// Hash `parts` (concatenated) under `domain`.
    fn hash(&self, domain: HashDomain, parts: &[&[u8]]) -> Hash;

    /// Short algorithm name for logs and configuration.
    fn name(&self) -> &'static str;

    /// Hash a single commitment-tree leaf value.
    fn hash_leaf(&self, value: &[u8; 32]) -> Hash {
        self.hash(HashDomain::Leaf, &[value.as_slice()])
    }

    /// Combine two children into their parent.
    fn hash_node(&self, left: &Hash, right: &Hash) -> Hash {
        self.hash(HashDomain::Node, &[left.as_slice(), right.as_slice()])
    }
}

/// Keccak-256 back-end (default).
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Hasher;

impl DomainHasher for Keccak256Hasher {
    fn hash(&self, domain: HashDomain, parts: &[&[u8]]) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update([domain.tag()]);
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }

    fn name(&self) -> &'static str {
        "keccak256"
    }
}

/// BLAKE3 back-end.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher;

impl DomainHasher for Blake3Hasher {
    fn hash(&self, domain: HashDomain, parts: &[&[u8]]) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[domain.tag()]);
        for part in parts {
            hasher.update(part);
        }
        *hasher.finalize().as_bytes()
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}
