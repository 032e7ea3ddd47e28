// Path: crates/types/src/app/mod.rs
//! Core application-level data structures like destinations and transactions.

/// The `Destination` address type and its human-readable form.
pub mod destination;
/// Fixed-layout buffers exchanged with the storage-proof verifier.
pub mod post;
/// The request/response schema used by the RPC layer for templates.
pub mod rpc;
/// Template kinds and content-addressed template identifiers.
pub mod template_id;
/// The minimal spending transaction evaluated by templates.
pub mod transaction;

pub use destination::{Destination, DestinationPrefix};
pub use post::{
    CommR, PostAttachment, PostBase, PostCandidates, PostProof, ProverId, Randomness, SectorIds,
};
pub use rpc::{PostTemplateData, TemplateRequest, TemplateResponse};
pub use template_id::{TemplateId, TemplateType};
pub use transaction::{Transaction, TxInput};

/// A fixed-size, 32-byte hash (block hash, transaction id, digest).
pub type Hash32 = [u8; 32];
