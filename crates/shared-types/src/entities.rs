//! # Core Domain Entities
//!
//! Fixed-width primitives used by the payroll protocol.
//!
//! ## Clusters
//!
//! - **Hashing**: `Hash`, `SlotIndex`
//! - **Tree contents**: `LeafValue`, `ClaimFlag`
//! - **Accounting**: `Amount`, `Epoch`, `AccountId`

use crate::errors::PrimitiveError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// HASHING
// =============================================================================

/// A 32-byte digest (Keccak-256 or BLAKE3 depending on the configured hasher).
pub type Hash = [u8; 32];

/// Largest supported commitment-tree depth (one level per bit of a `SlotIndex`).
pub const MAX_TREE_DEPTH: usize = 256;

/// Coordinate of a leaf in a fixed-depth sparse commitment tree.
///
/// Stored as a big-endian 256-bit integer. Bit `0` is the least significant
/// bit and selects the leaf's position among its siblings; bit `depth - 1`
/// selects the subtree directly under the root.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SlotIndex(pub [u8; 32]);

impl SlotIndex {
    /// The leftmost slot.
    pub const ZERO: SlotIndex = SlotIndex([0u8; 32]);

    /// Interpret a digest as a slot coordinate.
    pub fn from_hash(hash: Hash) -> Self {
        SlotIndex(hash)
    }

    /// Build a slot index from a small integer (handy for tests and tooling).
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        SlotIndex(bytes)
    }

    /// Raw big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Value of bit `level` (0 = least significant).
    pub fn bit(&self, level: usize) -> bool {
        debug_assert!(level < MAX_TREE_DEPTH);
        let byte = self.0[31 - level / 8];
        (byte >> (level % 8)) & 1 == 1
    }

    /// Copy with bit `level` set to `value`.
    pub fn with_bit(mut self, level: usize, value: bool) -> Self {
        let mask = 1u8 << (level % 8);
        let byte = &mut self.0[31 - level / 8];
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        self
    }

    /// Copy with bit `level` inverted.
    pub fn flip_bit(self, level: usize) -> Self {
        let current = self.bit(level);
        self.with_bit(level, !current)
    }

    /// Copy with the `count` least significant bits cleared.
    ///
    /// `(level, index.clear_low_bits(level))` names the ancestor of `index`
    /// at `level` uniquely.
    pub fn clear_low_bits(mut self, count: usize) -> Self {
        let count = count.min(MAX_TREE_DEPTH);
        let full_bytes = count / 8;
        for byte in self.0.iter_mut().rev().take(full_bytes) {
            *byte = 0;
        }
        let rem = count % 8;
        if rem > 0 {
            self.0[31 - full_bytes] &= !((1u8 << rem) - 1);
        }
        self
    }

    /// Keep only the `depth` least significant bits.
    pub fn truncate(mut self, depth: usize) -> Self {
        if depth >= MAX_TREE_DEPTH {
            return self;
        }
        let keep_bytes = depth / 8;
        let rem = depth % 8;
        for (i, byte) in self.0.iter_mut().enumerate() {
            let from_right = 31 - i;
            if from_right < keep_bytes {
                continue;
            }
            if from_right == keep_bytes && rem > 0 {
                *byte &= (1u8 << rem) - 1;
            } else {
                *byte = 0;
            }
        }
        self
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotIndex(0x{})", self.to_hex())
    }
}

/// Check a tree depth against the supported range.
pub fn validate_depth(depth: usize) -> Result<usize, PrimitiveError> {
    if depth == 0 || depth > MAX_TREE_DEPTH {
        return Err(PrimitiveError::InvalidDepth {
            depth,
            max: MAX_TREE_DEPTH,
        });
    }
    Ok(depth)
}

// =============================================================================
// TREE CONTENTS
// =============================================================================

/// Token amount in base units.
pub type Amount = u64;

/// Value stored at a leaf of a commitment tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LeafValue(pub [u8; 32]);

impl LeafValue {
    /// Sentinel held by every slot that was never written.
    pub const EMPTY: LeafValue = LeafValue([0u8; 32]);

    /// Encode an amount (big-endian in the low 8 bytes).
    pub fn from_amount(amount: Amount) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&amount.to_be_bytes());
        LeafValue(bytes)
    }

    /// Decode an amount; `None` if the high bytes are not zero.
    pub fn as_amount(&self) -> Option<Amount> {
        if self.0[..24].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&self.0[24..]);
        Some(Amount::from_be_bytes(low))
    }

    /// Whether this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Raw bytes (hash preimage).
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_amount() {
            Some(amount) => write!(f, "LeafValue({amount})"),
            None => write!(f, "LeafValue(0x{})", hex::encode(self.0)),
        }
    }
}

/// Per-slot claim status held in the claimed tree.
///
/// `Unclaimed -> Claimed` is the only transition and it is irreversible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimFlag {
    /// Never claimed. Same leaf value as an absent slot.
    Unclaimed,
    /// Claimed; terminal.
    Claimed,
}

impl ClaimFlag {
    /// Leaf encoding: 0 for `Unclaimed`, 1 for `Claimed`.
    pub fn leaf_value(self) -> LeafValue {
        match self {
            ClaimFlag::Unclaimed => LeafValue::EMPTY,
            ClaimFlag::Claimed => LeafValue::from_amount(1),
        }
    }

    /// Decode a claimed-tree leaf.
    pub fn from_leaf(leaf: LeafValue) -> Option<Self> {
        if leaf == ClaimFlag::Unclaimed.leaf_value() {
            Some(ClaimFlag::Unclaimed)
        } else if leaf == ClaimFlag::Claimed.leaf_value() {
            Some(ClaimFlag::Claimed)
        } else {
            None
        }
    }
}

// =============================================================================
// ACCOUNTING
// =============================================================================

/// Distribution round counter. Advances by exactly one per distribution.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Epoch(pub u64);

impl Epoch {
    /// Epoch before the first distribution.
    pub const ZERO: Epoch = Epoch(0);

    /// The following epoch.
    pub fn next(self) -> Result<Epoch, PrimitiveError> {
        self.0
            .checked_add(1)
            .map(Epoch)
            .ok_or(PrimitiveError::EpochOverflow { current: self.0 })
    }

    /// Big-endian encoding used in hash preimages.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ledger account identifier (an Ed25519 public key for holders).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Short hex prefix for logs.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl hex::FromHex for AccountId {
    type Error = hex::FromHexError;

    fn from_hex<T: AsRef<[u8]>>(input: T) -> Result<Self, Self::Error> {
        <[u8; 32] as hex::FromHex>::from_hex(input).map(AccountId)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
