// Path: crates/api/src/proof/mod.rs
//! The boundary to the external Proof-of-Spacetime (PoSt) verifier.
//!
//! The verifier itself is an opaque native routine. Everything that crosses this
//! boundary is an exact-length typed buffer, so an implementation never has to
//! re-check sizes or trust offset arithmetic done by the caller.

use vesta_types::app::{CommR, PostCandidates, PostProof, ProverId, Randomness, SectorIds};

/// One verification call: fixed parameters plus borrowed, length-checked buffers.
#[derive(Debug, Clone, Copy)]
pub struct PostVerifyRequest<'a> {
    /// Sector size in bytes.
    pub sector_size: u64,
    /// Challenge randomness.
    pub randomness: &'a Randomness,
    /// Number of challenges.
    pub challenge_count: u64,
    /// Sector identifiers.
    pub sector_ids: &'a SectorIds,
    /// Flattened replica commitments.
    pub comm_r: &'a CommR,
    /// The SNARK proof.
    pub proof: &'a PostProof,
    /// The candidate record.
    pub candidates: &'a PostCandidates,
    /// The prover's identifier.
    pub prover_id: &'a ProverId,
}

/// The verifier's answer, copied out of whatever the native side returned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostVerifyResponse {
    /// Native status code. Informational only.
    pub status_code: i32,
    /// Set when the verifier reported an error.
    pub error_msg: Option<String>,
    /// The verifier's own validity flag. Informational only.
    pub is_valid: bool,
}

impl PostVerifyResponse {
    /// A response with no error.
    pub fn accepted() -> Self {
        Self {
            status_code: 0,
            error_msg: None,
            is_valid: true,
        }
    }

    /// A response carrying an error.
    pub fn failed(status_code: i32, msg: impl Into<String>) -> Self {
        Self {
            status_code,
            error_msg: Some(msg.into()),
            is_valid: false,
        }
    }

    /// The only thing templates look at: did the verifier report no error.
    pub fn is_success(&self) -> bool {
        self.error_msg.is_none()
    }
}

/// A synchronous, bounded-time PoSt verifier.
///
/// Implementations must be safe to share across verification threads.
pub trait PostVerifier: Send + Sync {
    /// Verifies one proof.
    fn verify_post(&self, request: &PostVerifyRequest<'_>) -> PostVerifyResponse;
}
