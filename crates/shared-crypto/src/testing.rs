//! Test doubles.

use crate::hashing::{DomainHasher, HashDomain};
use shared_types::Hash;

/// Deterministic, non-cryptographic hasher for unit tests.
///
/// Four FNV-1a lanes with distinct offsets fill the 32-byte output. Good
/// enough to keep test fixtures collision-free; worthless against an
/// adversary.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubHasher;

const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;
const LANE_OFFSETS: [u64; 4] = [
    0xcbf2_9ce4_8422_2325,
    0x8422_2325_cbf2_9ce4,
    0x9e37_79b9_7f4a_7c15,
    0x7f4a_7c15_9e37_79b9,
];

impl DomainHasher for StubHasher {
    fn hash(&self, domain: HashDomain, parts: &[&[u8]]) -> Hash {
        let mut out = [0u8; 32];
        for (lane, offset) in LANE_OFFSETS.iter().enumerate() {
            let mut state = *offset ^ u64::from(domain.tag());
            for part in parts {
                for byte in part.iter() {
                    state ^= u64::from(*byte);
                    state = state.wrapping_mul(FNV_PRIME);
                }
            }
            out[lane * 8..(lane + 1) * 8].copy_from_slice(&state.to_be_bytes());
        }
        out
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
