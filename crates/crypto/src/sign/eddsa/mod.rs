// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Implementation of Ed25519 signatures using libp2p's identity keys

use crate::error::CryptoError;
use libp2p::identity::ed25519;
use vesta_api::crypto::{SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey};

/// Length of an Ed25519 signature in bytes.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Ed25519 key pair implementation
#[derive(Clone)]
pub struct Ed25519KeyPair(ed25519::Keypair);

/// Ed25519 signature implementation
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Ed25519Signature([u8; ED25519_SIGNATURE_LEN]);

/// Ed25519 public key implementation
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Ed25519PublicKey(ed25519::PublicKey);

/// Ed25519 private key implementation
#[derive(Clone)]
pub struct Ed25519PrivateKey(ed25519::SecretKey);

impl Ed25519KeyPair {
    /// Generate a new Ed25519 key pair
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(ed25519::Keypair::generate()))
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &Ed25519PrivateKey) -> Result<Self, CryptoError> {
        Ok(Self(ed25519::Keypair::from(private_key.0.clone())))
    }
}

impl SigningKeyPair for Ed25519KeyPair {
    type PublicKey = Ed25519PublicKey;
    type PrivateKey = Ed25519PrivateKey;
    type Signature = Ed25519Signature;

    fn public_key(&self) -> Self::PublicKey {
        Ed25519PublicKey(self.0.public())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Ed25519PrivateKey(self.0.secret())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ed25519Signature::from_bytes(&self.0.sign(message))
    }
}

impl VerifyingKey for Ed25519PublicKey {
    type Signature = Ed25519Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        if self.0.verify(message, &signature.0) {
            Ok(())
        } else {
            Err(CryptoError::VerificationFailed)
        }
    }
}

impl SerializableKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        ed25519::PublicKey::try_from_bytes(bytes)
            .map(Ed25519PublicKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse public key: {}", e)))
    }
}

impl SigningKey for Ed25519PrivateKey {
    type Signature = Ed25519Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        let keypair = ed25519::Keypair::from(self.0.clone());
        Ed25519Signature::from_bytes(&keypair.sign(message))
    }
}

impl SerializableKey for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        // Export just the seed (32 bytes)
        self.0.as_ref().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidKey(
                "Invalid private key length: expected 32 bytes".to_string(),
            ));
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(bytes);

        ed25519::SecretKey::try_from_bytes(&mut seed)
            .map(Ed25519PrivateKey)
            .map_err(|e| {
                CryptoError::InvalidKey(format!("Failed to create secret key from seed: {}", e))
            })
    }
}

impl SerializableKey for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        <[u8; ED25519_SIGNATURE_LEN]>::try_from(bytes)
            .map(Ed25519Signature)
            .map_err(|_| {
                CryptoError::InvalidSignature(format!(
                    "expected {} bytes, got {}",
                    ED25519_SIGNATURE_LEN,
                    bytes.len()
                ))
            })
    }
}

impl Signature for Ed25519Signature {}

impl Ed25519Signature {
    /// Get the raw signature bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Ed25519PublicKey {
    /// Get the raw public key bytes
    pub fn to_array(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl Ed25519PrivateKey {
    /// Get the public key corresponding to this private key
    pub fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        Ok(Ed25519PublicKey(
            ed25519::Keypair::from(self.0.clone()).public(),
        ))
    }
}

#[cfg(test)]
mod tests;
