// Path: crates/template/src/post/mod.rs

//! The PoSt template: a deferred-installment payment schedule.
//!
//! From `height_begin` until `height_max` the business party may spend one
//! installment per `height_cycle` blocks, each spend carrying a storage proof.
//! From `height_max` on, whatever is left belongs to the customer.

use parity_scale_codec::{Decode, Encode};
use std::collections::BTreeSet;
use std::str::FromStr;
use vesta_api::proof::{PostVerifier, PostVerifyRequest};
use vesta_api::template::{SpendContext, SpendingTemplate};
use vesta_crypto::algorithms::hash::sha256_concat;
use vesta_crypto::sign::destination::DestinationKey;
use vesta_types::app::post::POST_BASE_LEN;
use vesta_types::app::{
    CommR, Destination, Hash32, PostAttachment, PostBase, PostTemplateData, ProverId, Randomness,
    SectorIds, TemplateId, TemplateRequest, TemplateResponse, TemplateType, Transaction,
};
use vesta_types::codec::from_bytes_canonical_prefix;
use vesta_types::config::PostVerifierConfig;
use vesta_types::error::TemplateError;

/// Length of the canonical encoding: two destinations, the schedule and the
/// length-prefixed commitment payload.
pub const POST_TEMPLATE_DATA_LEN: usize = 2 * (1 + 32) + 4 + 4 + 8 + 8 + 2 + POST_BASE_LEN;

/// `height_cycle` must be strictly greater than this.
pub const MIN_HEIGHT_CYCLE: u32 = 30;

/// The encoded fields of a PoSt template, in wire order.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug)]
pub struct PostParams {
    /// Paid one installment per cycle while the schedule runs.
    pub business: Destination,
    /// Receives the remainder once the schedule has run out.
    pub customer: Destination,
    /// First height at which the template can be spent.
    pub height_begin: u32,
    /// Blocks per installment.
    pub height_cycle: u32,
    /// Total value committed.
    pub total: u64,
    /// Value released per installment.
    pub price: u64,
    /// Sector ids, CommR and prover id handed to the verifier.
    pub post_base: PostBase,
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            business: Destination::default(),
            customer: Destination::default(),
            height_begin: 0,
            height_cycle: 0,
            total: 0,
            price: 0,
            post_base: PostBase {
                sector_ids: SectorIds([0; SectorIds::LEN]),
                comm_r: CommR([0; CommR::LEN]),
                prover_id: ProverId([0; ProverId::LEN]),
            },
        }
    }
}

impl PostParams {
    /// `total / price`, or `None` when `price` is zero.
    pub fn installment_count(&self) -> Option<u64> {
        self.total.checked_div(self.price)
    }

    /// The first height at which the customer takes over.
    ///
    /// Computed in 64 bits and saturating, so it never wraps. `None` when
    /// `price` is zero.
    pub fn height_max(&self) -> Option<u64> {
        let count = self.installment_count()?;
        Some(
            u64::from(self.height_begin)
                .saturating_add(count.saturating_mul(u64::from(self.height_cycle))),
        )
    }
}

/// Where a height falls in the schedule. Phases are ordered as they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchedulePhase {
    /// Before `height_begin`. Nobody may spend.
    Inactive,
    /// `height_begin <= h < height_max`. The business party may spend.
    BusinessPeriod,
    /// `h >= height_max`. The customer may spend.
    CustomerPeriod,
}

/// A PoSt spending template with its cached encoding and derived id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTemplate {
    params: PostParams,
    encoding: Vec<u8>,
    id: TemplateId,
    verifier_config: PostVerifierConfig,
}

impl Default for PostTemplate {
    fn default() -> Self {
        Self::new(PostParams::default())
    }
}

fn derive_id(encoding: &[u8]) -> TemplateId {
    let tag = TemplateType::Post.tag().to_le_bytes();
    TemplateId::new(
        TemplateType::Post,
        sha256_concat(&[tag.as_slice(), encoding]),
    )
}

impl PostTemplate {
    /// Builds a template from explicit fields, computing its encoding and id.
    pub fn new(params: PostParams) -> Self {
        let encoding = params.encode();
        let id = derive_id(&encoding);
        Self {
            params,
            encoding,
            id,
            verifier_config: PostVerifierConfig::default(),
        }
    }

    /// Replaces the parameters passed to the verifier on every spend.
    pub fn with_verifier_config(mut self, config: PostVerifierConfig) -> Self {
        self.verifier_config = config;
        self
    }

    /// Decodes a template from the front of `bytes`.
    ///
    /// Trailing bytes are ignored; the id is the hash of the consumed prefix only.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TemplateError> {
        let (params, consumed) =
            from_bytes_canonical_prefix::<PostParams>(bytes).map_err(|e| {
                tracing::warn!(target: "template", error = %e, len = bytes.len(), "failed to decode post template");
                TemplateError::Decode(e)
            })?;
        let encoding = bytes
            .get(..consumed)
            .ok_or_else(|| TemplateError::Decode("decoder consumed past end of input".into()))?
            .to_vec();
        let id = derive_id(&encoding);
        Ok(Self {
            params,
            encoding,
            id,
            verifier_config: PostVerifierConfig::default(),
        })
    }

    /// The encoded fields.
    pub fn params(&self) -> &PostParams {
        &self.params
    }

    /// The content-addressed id.
    pub fn id(&self) -> TemplateId {
        self.id
    }

    /// The canonical encoding the id was derived from.
    pub fn canonical_bytes(&self) -> &[u8] {
        &self.encoding
    }

    /// Parameters passed to the verifier.
    pub fn verifier_config(&self) -> &PostVerifierConfig {
        &self.verifier_config
    }

    /// The on-chain address of this template.
    pub fn address(&self) -> Destination {
        Destination::from_template_id(&self.id)
    }

    /// Checks the parameter invariants.
    pub fn validate_params(&self) -> bool {
        let p = &self.params;
        p.height_cycle > MIN_HEIGHT_CYCLE && p.total != 0 && p.price != 0 && p.total % p.price == 0
    }

    /// See [`PostParams::height_max`].
    pub fn height_max(&self) -> Option<u64> {
        self.params.height_max()
    }

    /// Where `height` falls in the schedule.
    pub fn phase(&self, height: u32) -> SchedulePhase {
        let Some(height_max) = self.height_max() else {
            return SchedulePhase::Inactive;
        };
        if height < self.params.height_begin {
            SchedulePhase::Inactive
        } else if u64::from(height) < height_max {
            SchedulePhase::BusinessPeriod
        } else {
            SchedulePhase::CustomerPeriod
        }
    }

    /// The party allowed to sign a spend at `height`.
    pub fn select_authorized_party(&self, height: u32) -> Option<&Destination> {
        match self.phase(height) {
            SchedulePhase::Inactive => None,
            SchedulePhase::BusinessPeriod => Some(&self.params.business),
            SchedulePhase::CustomerPeriod => Some(&self.params.customer),
        }
    }

    /// Verifies `signature` over `digest` against the party authorized at `height`.
    pub fn verify_signature(&self, digest: &Hash32, signature: &[u8], height: u32) -> bool {
        match self.select_authorized_party(height) {
            Some(party) => party.verify(digest, signature),
            None => {
                tracing::debug!(target: "template", template = %self.id, height, "no party authorized at height");
                false
            }
        }
    }

    /// Verifies the signature of a full spending transaction.
    ///
    /// `Ok(true)` means the signature verified and the signature set is complete.
    /// Errors only when the schedule itself is unusable (`price == 0`).
    pub fn verify_tx_signature(
        &self,
        digest: &Hash32,
        _anchor: &Hash32,
        _send_to: &Destination,
        signature: &[u8],
        height: u32,
    ) -> Result<bool, TemplateError> {
        if self.height_max().is_none() {
            return Err(TemplateError::InvalidParams("price is zero".into()));
        }
        Ok(self.verify_signature(digest, signature, height))
    }

    /// Verifies a signature wrapped in a proof envelope.
    ///
    /// The first [`POST_TEMPLATE_DATA_LEN`] bytes of `raw_signature` are skipped;
    /// the rest holds a length-prefixed proof payload followed by the
    /// length-prefixed inner signature. An envelope whose payload starts with
    /// this template's own `post_base` is refused.
    pub fn verify_enveloped_signature(
        &self,
        digest: &Hash32,
        raw_signature: &[u8],
        height: u32,
    ) -> bool {
        let Some(body) = raw_signature.get(POST_TEMPLATE_DATA_LEN..) else {
            tracing::debug!(target: "template", len = raw_signature.len(), "signature envelope too short");
            return false;
        };
        let (proof_payload, inner_signature) =
            match from_bytes_canonical_prefix::<(Vec<u8>, Vec<u8>)>(body) {
                Ok((envelope, _)) => envelope,
                Err(e) => {
                    tracing::debug!(target: "template", error = %e, "malformed signature envelope");
                    return false;
                }
            };
        let post_base = self.params.post_base.to_bytes();
        if proof_payload.get(..POST_BASE_LEN) == Some(post_base.as_slice()) {
            tracing::debug!(target: "template", template = %self.id, "envelope repeats the template's post_base");
            return false;
        }
        self.verify_signature(digest, &inner_signature, height)
    }

    /// The destinations that must sign a spend at `height`.
    pub fn resolve_signers(&self, height: u32) -> BTreeSet<Destination> {
        self.select_authorized_party(height)
            .into_iter()
            .copied()
            .collect()
    }

    /// Resolves signers from the signing height carried in the first four bytes
    /// (little-endian) of `tx.sig`.
    pub fn sign_destinations(
        &self,
        tx: &Transaction,
    ) -> Result<BTreeSet<Destination>, TemplateError> {
        let height_bytes: [u8; 4] = tx
            .sig
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                TemplateError::Signature(format!(
                    "signature too short for a signing height: {} bytes",
                    tx.sig.len()
                ))
            })?;
        Ok(self.resolve_signers(u32::from_le_bytes(height_bytes)))
    }

    /// Appends the caller's pre-signature to an empty signature. No framing is added.
    pub fn build_tx_signature(&self, pre_signature: &[u8]) -> Vec<u8> {
        let mut sig = Vec::with_capacity(pre_signature.len());
        sig.extend_from_slice(pre_signature);
        sig
    }

    /// Runs every spend rule against `tx`. Any failure is logged and yields `false`.
    pub fn verify_transaction(
        &self,
        tx: &Transaction,
        block_hash: &Hash32,
        height: u32,
        value_in: u64,
        verifier: &dyn PostVerifier,
    ) -> bool {
        match self.check_spend(tx, block_hash, height, value_in, verifier) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(target: "post", template = %self.id, height, error = %e, "spend rejected");
                false
            }
        }
    }

    fn check_spend(
        &self,
        tx: &Transaction,
        block_hash: &Hash32,
        height: u32,
        value_in: u64,
        verifier: &dyn PostVerifier,
    ) -> Result<(), TemplateError> {
        let p = &self.params;

        let outflow = tx
            .amount
            .checked_add(tx.fee)
            .ok_or_else(|| TemplateError::InvalidRequest("amount + fee overflows".into()))?;
        if outflow != p.price {
            return Err(TemplateError::InvalidRequest(format!(
                "amount + fee is {}, installment is {}",
                outflow, p.price
            )));
        }
        if tx.inputs.len() != 1 {
            return Err(TemplateError::InvalidRequest(format!(
                "expected exactly one input, got {}",
                tx.inputs.len()
            )));
        }

        let elapsed = height.checked_sub(p.height_begin).ok_or_else(|| {
            TemplateError::InvalidRequest(format!(
                "height {} precedes height_begin {}",
                height, p.height_begin
            ))
        })?;
        let cycles = u64::from(elapsed)
            .checked_div(u64::from(p.height_cycle))
            .ok_or_else(|| TemplateError::InvalidParams("height_cycle is zero".into()))?;
        // An overflowing product already exceeds any total.
        let surplus = p
            .price
            .checked_mul(cycles)
            .map_or(0, |released| p.total.saturating_sub(released));
        if value_in < surplus {
            return Err(TemplateError::InvalidRequest(format!(
                "input value {} below remaining surplus {}",
                value_in, surplus
            )));
        }

        let attachment = PostAttachment::from_tx_data(&tx.data)?;
        let randomness = Randomness(*block_hash);
        let request = PostVerifyRequest {
            sector_size: self.verifier_config.sector_size,
            randomness: &randomness,
            challenge_count: self.verifier_config.challenge_count,
            sector_ids: &p.post_base.sector_ids,
            comm_r: &p.post_base.comm_r,
            proof: &attachment.proof,
            candidates: &attachment.candidates,
            prover_id: &p.post_base.prover_id,
        };
        let response = verifier.verify_post(&request);
        if !response.is_success() {
            return Err(TemplateError::Proof(format!(
                "verifier status {}: {}",
                response.status_code,
                response.error_msg.unwrap_or_default()
            )));
        }
        Ok(())
    }

    /// The human-readable fields for the RPC layer.
    pub fn template_data(&self) -> PostTemplateData {
        let p = &self.params;
        PostTemplateData {
            business: p.business.to_string(),
            customer: p.customer.to_string(),
            height_begin: p.height_begin,
            height_cycle: p.height_cycle,
            total: p.total,
            price: p.price,
            post_base: p.post_base.to_hex(),
        }
    }

    /// The full RPC rendering: type name, encoding, own address and fields.
    pub fn to_response(&self) -> TemplateResponse {
        TemplateResponse {
            template_type: TemplateType::Post.name().to_string(),
            hex: hex::encode(&self.encoding),
            address: self.address().to_string(),
            post: self.template_data(),
        }
    }

    /// Replaces every field from an RPC request. On error nothing changes.
    pub fn set_from_request(&mut self, request: &TemplateRequest) -> Result<(), TemplateError> {
        if request.template_type != TemplateType::Post.name() {
            return Err(TemplateError::TypeMismatch {
                expected: TemplateType::Post.name().to_string(),
                got: request.template_type.clone(),
            });
        }
        let data = &request.post;
        let business = parse_party("business", &data.business)?;
        let customer = parse_party("customer", &data.customer)?;
        let post_base = PostBase::from_hex(&data.post_base)
            .map_err(|e| TemplateError::InvalidRequest(format!("post_base: {}", e)))?;

        let config = self.verifier_config.clone();
        *self = Self::new(PostParams {
            business,
            customer,
            height_begin: data.height_begin,
            height_cycle: data.height_cycle,
            total: data.total,
            price: data.price,
            post_base,
        })
        .with_verifier_config(config);
        Ok(())
    }

    /// Replaces every field from canonical bytes and re-derives the id.
    /// On error nothing changes.
    pub fn set_template_data(&mut self, bytes: &[u8]) -> Result<(), TemplateError> {
        let config = self.verifier_config.clone();
        *self = Self::from_bytes(bytes)?.with_verifier_config(config);
        Ok(())
    }
}

fn parse_party(field: &str, address: &str) -> Result<Destination, TemplateError> {
    let dest = Destination::from_str(address)
        .map_err(|e| TemplateError::InvalidRequest(format!("{}: {}", field, e)))?;
    if dest.is_null() {
        return Err(TemplateError::InvalidRequest(format!(
            "{}: null destination",
            field
        )));
    }
    Ok(dest)
}

impl SpendingTemplate for PostTemplate {
    fn template_type(&self) -> TemplateType {
        TemplateType::Post
    }

    fn id(&self) -> TemplateId {
        self.id
    }

    fn canonical_bytes(&self) -> &[u8] {
        &self.encoding
    }

    fn validate_params(&self) -> bool {
        PostTemplate::validate_params(self)
    }

    fn set_template_data(&mut self, bytes: &[u8]) -> Result<(), TemplateError> {
        PostTemplate::set_template_data(self, bytes)
    }

    fn resolve_signers(&self, height: u32) -> BTreeSet<Destination> {
        PostTemplate::resolve_signers(self, height)
    }

    fn verify_signature(&self, digest: &Hash32, signature: &[u8], height: u32) -> bool {
        PostTemplate::verify_signature(self, digest, signature, height)
    }

    fn build_tx_signature(&self, pre_signature: &[u8]) -> Vec<u8> {
        PostTemplate::build_tx_signature(self, pre_signature)
    }

    fn verify_transaction(
        &self,
        tx: &Transaction,
        ctx: &SpendContext<'_>,
        verifier: &dyn PostVerifier,
    ) -> bool {
        PostTemplate::verify_transaction(
            self,
            tx,
            ctx.block_hash,
            ctx.height,
            ctx.value_in,
            verifier,
        )
    }
}

#[cfg(test)]
mod tests;
