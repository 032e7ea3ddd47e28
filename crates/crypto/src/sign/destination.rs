// Path: crates/crypto/src/sign/destination.rs
//! Signature checks against [`Destination`] values.
//!
//! Only `PubKey` destinations carry key material; `Null` and `Template`
//! destinations can never produce a valid signature.

use crate::error::CryptoError;
use crate::sign::eddsa::Ed25519PublicKey;
use vesta_api::crypto::{SerializableKey, VerifyingKey};
use vesta_types::app::{Destination, Hash32};

/// Extension methods that tie a [`Destination`] to its Ed25519 key.
pub trait DestinationKey {
    /// Parses the destination's payload as an Ed25519 public key.
    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError>;

    /// Returns `true` if `signature` is a valid signature over `digest`
    /// by this destination's key.
    fn verify(&self, digest: &Hash32, signature: &[u8]) -> bool;
}

impl DestinationKey for Destination {
    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        let bytes = self.public_key_bytes().ok_or_else(|| {
            CryptoError::InvalidKey(format!("destination {} is not a public key", self))
        })?;
        Ed25519PublicKey::from_bytes(bytes)
    }

    fn verify(&self, digest: &Hash32, signature: &[u8]) -> bool {
        match self.public_key() {
            Ok(key) => {
                let ok = key.verify_encoded(digest, signature);
                if !ok {
                    tracing::debug!(target: "template", destination = %self, "signature rejected");
                }
                ok
            }
            Err(e) => {
                tracing::debug!(target: "template", destination = %self, error = %e, "destination cannot sign");
                false
            }
        }
    }
}
