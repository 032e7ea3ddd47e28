// Path: crates/crypto/src/error.rs
//! Local error types for the `vesta-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use vesta_api::error::CryptoError;
