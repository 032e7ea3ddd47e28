// Path: crates/crypto/src/lib.rs
//! # Vesta Kernel Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # Vesta Kernel Cryptography
//!
//! Hashing, Ed25519 signatures and destination signature checks for the
//! Vesta template kernel.

pub mod algorithms;
pub mod error;
pub mod sign;
