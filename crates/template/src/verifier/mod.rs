// Path: crates/template/src/verifier/mod.rs

//! Adapters from the [`vesta_api::proof::PostVerifier`] trait to concrete verifiers.

pub mod native;
