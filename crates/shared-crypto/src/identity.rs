//! # Ed25519 Identities
//!
//! Recipients and the payer are both identified by an Ed25519 key pair.
//!
//! - A recipient's `PublicIdentity` is the preimage of its slot index; the
//!   secret only ever proves knowledge and is never stored by the protocol.
//! - The payer signs distribution authorizations with its `IdentitySecret`.

use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use shared_types::AccountId;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret credential (32-byte Ed25519 seed).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct IdentitySecret {
    seed: [u8; 32],
}

impl IdentitySecret {
    /// Generate a random secret.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self {
            seed: signing_key.to_bytes(),
        }
    }

    /// Restore from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self { seed }
    }

    /// Restore from a hex-encoded seed.
    pub fn from_hex(input: &str) -> Result<Self, CryptoError> {
        let trimmed = input.strip_prefix("0x").unwrap_or(input);
        let bytes = hex::decode(trimmed).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let len = bytes.len();
        let seed: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: 32,
            actual: len,
        })?;
        Ok(Self { seed })
    }

    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.seed)
    }

    /// Derive the public identity.
    pub fn public_identity(&self) -> PublicIdentity {
        PublicIdentity(self.signing_key().verifying_key().to_bytes())
    }

    /// Sign a message (deterministic).
    pub fn sign(&self, message: &[u8]) -> IdentitySignature {
        IdentitySignature(self.signing_key().sign(message).to_bytes())
    }
}

impl fmt::Debug for IdentitySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentitySecret(<redacted>)")
    }
}

/// Public half of an identity (compressed Edwards point).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicIdentity([u8; 32]);

impl PublicIdentity {
    /// Canonical byte representation (hash preimage).
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Ledger account owned by this identity.
    pub fn account_id(&self) -> AccountId {
        AccountId(self.0)
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &IdentitySignature) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicIdentity)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl fmt::Debug for PublicIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicIdentity(0x{})", hex::encode(self.0))
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentitySignature([u8; 64]);

impl IdentitySignature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}
