// Path: crates/crypto/src/sign/mod.rs

pub mod destination;
pub mod eddsa;
