// Path: crates/api/src/template/mod.rs
//! Defines the core `SpendingTemplate` trait.

use crate::error::TemplateError;
use crate::proof::PostVerifier;
use std::collections::BTreeSet;
use vesta_types::app::{Destination, Hash32, TemplateId, TemplateType, Transaction};

/// Chain context a spend is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct SpendContext<'a> {
    /// Hash of the block the spend is evaluated in.
    pub block_hash: &'a Hash32,
    /// Height of that block.
    pub height: u32,
    /// Value currently locked by the template output being spent.
    pub value_in: u64,
}

/// The capability set shared by every spending template kind.
///
/// Templates are immutable once built; the only mutation is a whole-object
/// replacement through [`SpendingTemplate::set_template_data`], which needs
/// exclusive access.
pub trait SpendingTemplate: Send + Sync {
    /// The template kind.
    fn template_type(&self) -> TemplateType;

    /// The content-addressed identifier.
    fn id(&self) -> TemplateId;

    /// The canonical encoding the identifier was derived from.
    fn canonical_bytes(&self) -> &[u8];

    /// Checks the parameter invariants. Height-gated operations are only
    /// meaningful on templates for which this returns `true`.
    fn validate_params(&self) -> bool;

    /// Replaces every field from canonical bytes and re-derives the identifier.
    /// On error the template is left unchanged.
    fn set_template_data(&mut self, bytes: &[u8]) -> Result<(), TemplateError>;

    /// The destinations whose signature is needed to spend at `height`.
    fn resolve_signers(&self, height: u32) -> BTreeSet<Destination>;

    /// Verifies a signature over `digest` for a spend at `height`.
    fn verify_signature(&self, digest: &Hash32, signature: &[u8], height: u32) -> bool;

    /// Frames a caller-produced signature for inclusion in a transaction.
    fn build_tx_signature(&self, pre_signature: &[u8]) -> Vec<u8>;

    /// Runs every template-specific check on a spending transaction.
    fn verify_transaction(
        &self,
        tx: &Transaction,
        ctx: &SpendContext<'_>,
        verifier: &dyn PostVerifier,
    ) -> bool;
}
