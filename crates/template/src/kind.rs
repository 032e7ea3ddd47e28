// Path: crates/template/src/kind.rs

//! The closed set of template kinds, dispatched by type tag.

use crate::post::PostTemplate;
use std::collections::BTreeSet;
use vesta_api::proof::PostVerifier;
use vesta_api::template::{SpendContext, SpendingTemplate};
use vesta_types::app::{
    Destination, Hash32, TemplateId, TemplateRequest, TemplateResponse, TemplateType, Transaction,
};
use vesta_types::config::TemplateEngineConfig;
use vesta_types::error::TemplateError;

/// Any template this kernel can evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Deferred installments settled with a storage proof.
    Post(PostTemplate),
}

impl Template {
    /// Decodes a template of a known kind from canonical bytes.
    pub fn from_bytes(template_type: TemplateType, bytes: &[u8]) -> Result<Self, TemplateError> {
        match template_type {
            TemplateType::Post => PostTemplate::from_bytes(bytes).map(Self::Post),
        }
    }

    /// Decodes a template whose kind is given by its numeric tag.
    pub fn from_tag(tag: u16, bytes: &[u8]) -> Result<Self, TemplateError> {
        Self::from_bytes(TemplateType::from_tag(tag)?, bytes)
    }

    /// Builds a template from an RPC request, dispatching on its `type` name.
    pub fn from_request(request: &TemplateRequest) -> Result<Self, TemplateError> {
        match TemplateType::from_name(&request.template_type)? {
            TemplateType::Post => {
                let mut post = PostTemplate::default();
                post.set_from_request(request)?;
                Ok(Self::Post(post))
            }
        }
    }

    /// Applies engine configuration to the template.
    pub fn with_config(self, config: &TemplateEngineConfig) -> Self {
        match self {
            Self::Post(t) => Self::Post(t.with_verifier_config(config.verifier.clone())),
        }
    }

    /// The on-chain address of the template.
    pub fn address(&self) -> Destination {
        Destination::from_template_id(&self.id())
    }

    /// The RPC rendering of the template.
    pub fn to_response(&self) -> TemplateResponse {
        match self {
            Self::Post(t) => t.to_response(),
        }
    }

    /// The PoSt template, if this is one.
    pub fn as_post(&self) -> Option<&PostTemplate> {
        match self {
            Self::Post(t) => Some(t),
        }
    }
}

impl SpendingTemplate for Template {
    fn template_type(&self) -> TemplateType {
        match self {
            Self::Post(t) => t.template_type(),
        }
    }

    fn id(&self) -> TemplateId {
        match self {
            Self::Post(t) => SpendingTemplate::id(t),
        }
    }

    fn canonical_bytes(&self) -> &[u8] {
        match self {
            Self::Post(t) => SpendingTemplate::canonical_bytes(t),
        }
    }

    fn validate_params(&self) -> bool {
        match self {
            Self::Post(t) => SpendingTemplate::validate_params(t),
        }
    }

    fn set_template_data(&mut self, bytes: &[u8]) -> Result<(), TemplateError> {
        match self {
            Self::Post(t) => SpendingTemplate::set_template_data(t, bytes),
        }
    }

    fn resolve_signers(&self, height: u32) -> BTreeSet<Destination> {
        match self {
            Self::Post(t) => SpendingTemplate::resolve_signers(t, height),
        }
    }

    fn verify_signature(&self, digest: &Hash32, signature: &[u8], height: u32) -> bool {
        match self {
            Self::Post(t) => SpendingTemplate::verify_signature(t, digest, signature, height),
        }
    }

    fn build_tx_signature(&self, pre_signature: &[u8]) -> Vec<u8> {
        match self {
            Self::Post(t) => SpendingTemplate::build_tx_signature(t, pre_signature),
        }
    }

    fn verify_transaction(
        &self,
        tx: &Transaction,
        ctx: &SpendContext<'_>,
        verifier: &dyn PostVerifier,
    ) -> bool {
        match self {
            Self::Post(t) => SpendingTemplate::verify_transaction(t, tx, ctx, verifier),
        }
    }
}
