// Path: crates/types/src/app/destination.rs

//! Defines the canonical `Destination`, the identity that owns or may spend an output.
//!
//! A destination is a one-byte discriminant plus a 32-byte payload. For `PubKey`
//! destinations the payload is an Ed25519 public key; for `Template` destinations it
//! is the packed identifier of a spending template.

use crate::app::template_id::TemplateId;
use crate::error::TemplateError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The discriminant of a [`Destination`].
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Default,
)]
pub enum DestinationPrefix {
    /// The empty destination. Never authorized to spend.
    #[default]
    #[codec(index = 0)]
    Null,
    /// A destination controlled by a single public key.
    #[codec(index = 1)]
    PubKey,
    /// A destination controlled by a spending template.
    #[codec(index = 2)]
    Template,
}

impl DestinationPrefix {
    fn as_digit(self) -> char {
        match self {
            Self::Null => '0',
            Self::PubKey => '1',
            Self::Template => '2',
        }
    }

    fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Null),
            '1' => Some(Self::PubKey),
            '2' => Some(Self::Template),
            _ => None,
        }
    }
}

/// An address on chain. Ordered by prefix, then by payload bytes.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Default,
)]
pub struct Destination {
    /// The discriminant.
    pub prefix: DestinationPrefix,
    /// The payload, interpreted according to `prefix`.
    pub data: [u8; 32],
}

impl Destination {
    /// Creates a destination from its raw parts.
    pub fn new(prefix: DestinationPrefix, data: [u8; 32]) -> Self {
        Self { prefix, data }
    }

    /// Creates a destination controlled by an Ed25519 public key.
    pub fn from_pubkey(public_key: [u8; 32]) -> Self {
        Self::new(DestinationPrefix::PubKey, public_key)
    }

    /// Creates a destination that references a spending template by id.
    pub fn from_template_id(id: &TemplateId) -> Self {
        Self::new(DestinationPrefix::Template, id.packed())
    }

    /// Returns true for the empty destination.
    pub fn is_null(&self) -> bool {
        self.prefix == DestinationPrefix::Null
    }

    /// Returns true if this destination is controlled by a public key.
    pub fn is_pubkey(&self) -> bool {
        self.prefix == DestinationPrefix::PubKey
    }

    /// Returns true if this destination references a template.
    pub fn is_template(&self) -> bool {
        self.prefix == DestinationPrefix::Template
    }

    /// The raw public key bytes, if this is a `PubKey` destination.
    pub fn public_key_bytes(&self) -> Option<&[u8; 32]> {
        self.is_pubkey().then_some(&self.data)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.prefix.as_digit(),
            bs58::encode(self.data).into_string()
        )
    }
}

impl FromStr for Destination {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let prefix = chars
            .next()
            .and_then(DestinationPrefix::from_digit)
            .ok_or_else(|| TemplateError::InvalidRequest(format!("unknown address prefix: {s}")))?;
        let payload = bs58::decode(chars.as_str())
            .into_vec()
            .map_err(|e| TemplateError::InvalidRequest(format!("bad address encoding: {e}")))?;
        let data: [u8; 32] = payload.try_into().map_err(|v: Vec<u8>| {
            TemplateError::InvalidRequest(format!(
                "address payload must be 32 bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self { prefix, data })
    }
}
