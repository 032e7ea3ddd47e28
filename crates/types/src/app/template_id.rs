// Path: crates/types/src/app/template_id.rs

//! Template kinds and the content-addressed `TemplateId`.

use crate::error::TemplateError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The closed set of template kinds this kernel knows how to evaluate.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TemplateType {
    /// Deferred installments gated by block height, settled with a storage proof.
    Post,
}

impl TemplateType {
    /// The numeric type tag mixed into the template id.
    pub const fn tag(self) -> u16 {
        match self {
            Self::Post => 8,
        }
    }

    /// The name used by the RPC layer.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Post => "post",
        }
    }

    /// Resolves a numeric type tag.
    pub fn from_tag(tag: u16) -> Result<Self, TemplateError> {
        match tag {
            8 => Ok(Self::Post),
            other => Err(TemplateError::TypeMismatch {
                expected: "known template tag".into(),
                got: other.to_string(),
            }),
        }
    }

    /// Resolves an RPC template name.
    pub fn from_name(name: &str) -> Result<Self, TemplateError> {
        match name {
            "post" => Ok(Self::Post),
            other => Err(TemplateError::TypeMismatch {
                expected: "known template name".into(),
                got: other.to_string(),
            }),
        }
    }
}

/// The identity of a template: its kind plus the hash of its canonical encoding.
///
/// Never set directly. The template crate derives it as
/// `SHA-256(tag.to_le_bytes() || canonical_encoding)`.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
pub struct TemplateId {
    /// The template kind's numeric tag.
    pub type_tag: u16,
    /// The content hash.
    pub content_hash: [u8; 32],
}

impl TemplateId {
    /// Wraps an already computed content hash.
    pub fn new(template_type: TemplateType, content_hash: [u8; 32]) -> Self {
        Self {
            type_tag: template_type.tag(),
            content_hash,
        }
    }

    /// The 32-byte form stored in a `Template` destination: the type tag in the first
    /// two bytes (little-endian) followed by bytes `2..32` of the content hash.
    pub fn packed(&self) -> [u8; 32] {
        let mut out = self.content_hash;
        let [lo, hi] = self.type_tag.to_le_bytes();
        let [b0, b1, ..] = &mut out;
        *b0 = lo;
        *b1 = hi;
        out
    }

    /// The template kind, if the tag is known.
    pub fn template_type(&self) -> Result<TemplateType, TemplateError> {
        TemplateType::from_tag(self.type_tag)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.type_tag, hex::encode(self.content_hash))
    }
}
