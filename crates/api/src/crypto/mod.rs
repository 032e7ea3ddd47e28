// Path: crates/api/src/crypto/mod.rs
//! Key and signature traits used by template authorization.
//!
//! Templates only ever verify; signing exists so operators and tests can
//! produce the signatures templates check.

use crate::error::CryptoError;

/// Key or signature material with a fixed byte encoding.
pub trait SerializableKey {
    /// The raw encoding.
    fn to_bytes(&self) -> Vec<u8>;

    /// Parses the raw encoding, rejecting wrong lengths and invalid points.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// A signing key pair.
pub trait SigningKeyPair {
    /// The public half, as stored in a `PubKey` destination.
    type PublicKey: VerifyingKey<Signature = Self::Signature>;
    /// The private half.
    type PrivateKey: SigningKey<Signature = Self::Signature>;
    /// The signature type produced.
    type Signature: Signature;

    /// The public half.
    fn public_key(&self) -> Self::PublicKey;
    /// The private half.
    fn private_key(&self) -> Self::PrivateKey;
    /// Signs `message`.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
}

/// A public key that can check signatures.
pub trait VerifyingKey: SerializableKey {
    /// The signature type that this key can verify.
    type Signature: Signature;

    /// Verifies a parsed signature against a message.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError>;

    /// Parses `signature` and verifies it. Malformed signatures are simply invalid.
    fn verify_encoded(&self, message: &[u8], signature: &[u8]) -> bool
    where
        Self::Signature: Sized,
    {
        Self::Signature::from_bytes(signature)
            .and_then(|sig| self.verify(message, &sig))
            .is_ok()
    }
}

/// A private key.
pub trait SigningKey: SerializableKey {
    /// The signature type that this key produces.
    type Signature: Signature;
    /// Signs `message`.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
}

/// Marker for signature values.
pub trait Signature: SerializableKey {}
