// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for all consensus-critical data.
//!
//! This module provides thin wrappers around `parity-scale-codec` (SCALE). Integers
//! are little-endian and fixed width, fixed-size byte arrays are written verbatim and
//! variable-size sequences carry a compact length prefix. Because a template's identity
//! is the hash of its encoding, every component must go through these helpers so the
//! same value always yields the same bytes.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical byte representation.
///
/// This function should be used for all data that is hashed into an identifier or
/// signed over.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation.
///
/// The whole buffer must be consumed; trailing bytes are an error. This is the
/// strict form used for data that must round-trip exactly.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

/// Decodes a value from the front of a buffer and reports how many bytes it used.
///
/// Unlike [`from_bytes_canonical`], trailing bytes are left untouched. Callers that
/// need to pin the identity of the decoded value hash `&b[..consumed]`.
pub fn from_bytes_canonical_prefix<T: Decode>(b: &[u8]) -> Result<(T, usize), String> {
    let mut input = b;
    let value =
        T::decode(&mut input).map_err(|e| format!("canonical decode failed: {}", e))?;
    Ok((value, b.len() - input.len()))
}
