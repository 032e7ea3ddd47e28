// Path: crates/api/src/lib.rs

//! # Vesta Kernel API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Vesta Kernel API
//!
//! Core traits and interfaces for the Vesta template kernel. This crate defines
//! the stable contract between templates, key material and the external
//! storage-proof verifier.

/// Defines unified traits for cryptographic primitives.
pub mod crypto;
/// Re-exports all core error types from the central `vesta-types` crate.
pub mod error;
/// The boundary to the external Proof-of-Spacetime verifier.
pub mod proof;
/// The capability set every spending template implements.
pub mod template;
