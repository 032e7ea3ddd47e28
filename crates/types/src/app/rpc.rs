// Path: crates/types/src/app/rpc.rs

//! The JSON request/response schema that the RPC layer exchanges with templates.
//!
//! Addresses travel as human-readable strings and the commitment payload as hex;
//! conversion to typed values happens in the template that consumes the request.

use serde::{Deserialize, Serialize};

/// The human-readable fields of a PoSt template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostTemplateData {
    /// Address of the party paid during the installment period.
    pub business: String,
    /// Address of the party paid after all installments.
    pub customer: String,
    /// First active block height.
    pub height_begin: u32,
    /// Blocks per installment.
    pub height_cycle: u32,
    /// Total value committed.
    pub total: u64,
    /// Value per installment.
    pub price: u64,
    /// Hex of the 72-byte commitment payload.
    pub post_base: String,
}

/// A request to build a template from human-readable fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    /// The template kind's name (e.g. `"post"`).
    #[serde(rename = "type")]
    pub template_type: String,
    /// Fields of a PoSt template.
    pub post: PostTemplateData,
}

/// A template rendered for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateResponse {
    /// The template kind's name.
    #[serde(rename = "type")]
    pub template_type: String,
    /// Hex of the canonical encoding.
    pub hex: String,
    /// The template's own address (a `Template` destination).
    pub address: String,
    /// Fields of a PoSt template.
    pub post: PostTemplateData,
}
