// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # Vesta Kernel Types
//!
//! This crate is the foundational library for the Vesta template kernel,
//! containing the value types that spending templates operate on, the
//! canonical binary codec, the error enums and the configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `vesta-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This prevents circular
//! dependencies and provides a single definition for shared types like
//! `Destination`, `TemplateId` and `Transaction`.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::TemplateError> = std::result::Result<T, E>;

/// Core application-level data structures: destinations, template ids,
/// transactions, PoSt buffers and the RPC schema.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical data.
pub mod codec;
/// Configuration structures for the template engine.
pub mod config;
/// A unified set of all error types used across the kernel.
pub mod error;
