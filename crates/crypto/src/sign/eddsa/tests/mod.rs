// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;

#[test]
fn test_keypair_generation() {
    let keypair = Ed25519KeyPair::generate().unwrap();
    let message = b"Test message";

    // Sign
    let signature = keypair.sign(message).unwrap();

    // Verify
    let public_key = keypair.public_key();
    assert!(public_key.verify(message, &signature).is_ok());
    assert!(public_key.verify_encoded(message, signature.as_bytes()));
}

#[test]
fn test_serialization_roundtrip() {
    let keypair = Ed25519KeyPair::generate().unwrap();

    let public_bytes = keypair.public_key().to_bytes();
    let private_bytes = keypair.private_key().to_bytes();

    assert_eq!(public_bytes.len(), 32);
    assert_eq!(private_bytes.len(), 32); // Just the seed

    let public_key = Ed25519PublicKey::from_bytes(&public_bytes).unwrap();
    let private_key = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();

    // The loaded private key derives the same public key
    let derived_public = private_key.public_key().unwrap();
    assert_eq!(public_key.to_bytes(), derived_public.to_bytes());
    assert_eq!(public_key.to_array().to_vec(), public_bytes);
}

#[test]
fn test_sign_verify_with_loaded_keys() {
    let original_keypair = Ed25519KeyPair::generate().unwrap();
    let message = b"Test message for persistence";

    let original_sig = original_keypair.sign(message).unwrap();

    let private_bytes = original_keypair.private_key().to_bytes();
    let loaded_private = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();
    let reconstructed_keypair = Ed25519KeyPair::from_private_key(&loaded_private).unwrap();

    // Ed25519 signatures are deterministic
    let new_sig = reconstructed_keypair.sign(message).unwrap();
    assert_eq!(original_sig.to_bytes(), new_sig.to_bytes());
    assert_eq!(loaded_private.sign(message).unwrap(), original_sig);

    let original_public = original_keypair.public_key();
    assert!(original_public.verify(message, &new_sig).is_ok());
}

#[test]
fn test_wrong_signature_fails() {
    let keypair1 = Ed25519KeyPair::generate().unwrap();
    let keypair2 = Ed25519KeyPair::generate().unwrap();
    let message = b"Test message";

    let signature = keypair1.sign(message).unwrap();

    let public_key2 = keypair2.public_key();
    assert!(matches!(
        public_key2.verify(message, &signature),
        Err(CryptoError::VerificationFailed)
    ));
}

#[test]
fn test_tampered_message_fails() {
    let keypair = Ed25519KeyPair::generate().unwrap();
    let message = b"Original message";
    let tampered = b"Tampered message";

    let signature = keypair.sign(message).unwrap();

    let public_key = keypair.public_key();
    assert!(public_key.verify(message, &signature).is_ok());
    assert!(public_key.verify(tampered, &signature).is_err());
}

#[test]
fn test_malformed_material_is_rejected() {
    assert!(Ed25519PublicKey::from_bytes(&[1u8; 31]).is_err());
    assert!(Ed25519PrivateKey::from_bytes(&[1u8; 33]).is_err());
    assert!(matches!(
        Ed25519Signature::from_bytes(&[0u8; 63]),
        Err(CryptoError::InvalidSignature(_))
    ));

    let keypair = Ed25519KeyPair::generate().unwrap();
    assert!(!keypair.public_key().verify_encoded(b"msg", &[0u8; 10]));
}
