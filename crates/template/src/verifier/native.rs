// Path: crates/template/src/verifier/native.rs

//! Adapter over a native PoSt verifier exposed through the C ABI.
//!
//! The native library owns its response allocation. The adapter copies what it
//! needs into an owned [`PostVerifyResponse`] and hands the raw pointer straight
//! back to the library's destructor.

use std::ffi::{c_char, CStr};
use vesta_api::proof::{PostVerifier, PostVerifyRequest, PostVerifyResponse};
use vesta_types::app::{CommR, PostCandidates, PostProof};

/// Number of sector ids passed per call.
const SECTOR_ID_COUNT: usize = 1;

/// Status reported when the native side returns no response at all.
pub const NULL_RESPONSE_STATUS: i32 = -1;

/// The response struct as laid out by the native library.
#[repr(C)]
#[derive(Debug)]
pub struct VerifyPostResponseRaw {
    /// Library status code.
    pub status_code: i32,
    /// NUL-terminated error message, or null on success.
    pub error_msg: *const c_char,
    /// The library's validity flag.
    pub is_valid: bool,
}

/// Signature of the native verification routine.
pub type VerifyPostFn = unsafe extern "C" fn(
    sector_size: u64,
    randomness: *const [u8; 32],
    challenge_count: u64,
    sector_ids: *const u64,
    sector_ids_len: usize,
    flattened_comm_rs: *const u8,
    flattened_comm_rs_len: usize,
    proof: *const u8,
    proof_len: usize,
    winners: *const u8,
    winners_len: usize,
    prover_id: *const [u8; 32],
) -> *mut VerifyPostResponseRaw;

/// Signature of the native routine that frees a response.
pub type DestroyResponseFn = unsafe extern "C" fn(response: *mut VerifyPostResponseRaw);

/// A [`PostVerifier`] backed by a native library.
#[derive(Clone, Copy)]
pub struct NativePostVerifier {
    verify: VerifyPostFn,
    destroy: DestroyResponseFn,
}

impl std::fmt::Debug for NativePostVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativePostVerifier").finish_non_exhaustive()
    }
}

impl NativePostVerifier {
    /// Wraps a native verifier.
    ///
    /// # Safety
    ///
    /// `verify` must only read the buffers it is given, within the lengths it is
    /// given, and must return either null or a pointer that stays valid until it
    /// is passed to `destroy`. Any non-null `error_msg` must point to a
    /// NUL-terminated string owned by that response.
    pub unsafe fn new(verify: VerifyPostFn, destroy: DestroyResponseFn) -> Self {
        Self { verify, destroy }
    }
}

/// Copies a raw response into owned memory.
///
/// # Safety
///
/// `raw.error_msg` must be null or point to a NUL-terminated string.
unsafe fn copy_response(raw: &VerifyPostResponseRaw) -> PostVerifyResponse {
    let error_msg = if raw.error_msg.is_null() {
        None
    } else {
        Some(
            unsafe { CStr::from_ptr(raw.error_msg) }
                .to_string_lossy()
                .into_owned(),
        )
    };
    PostVerifyResponse {
        status_code: raw.status_code,
        error_msg,
        is_valid: raw.is_valid,
    }
}

impl PostVerifier for NativePostVerifier {
    fn verify_post(&self, request: &PostVerifyRequest<'_>) -> PostVerifyResponse {
        // The library reads sector ids as native u64s; the typed buffer is not aligned.
        let sector_id = u64::from_le_bytes(request.sector_ids.0);

        // SAFETY: every pointer refers to a live, exactly sized buffer borrowed for
        // the duration of the call, and the lengths passed match those buffers.
        let raw = unsafe {
            (self.verify)(
                request.sector_size,
                &request.randomness.0,
                request.challenge_count,
                &sector_id,
                SECTOR_ID_COUNT,
                request.comm_r.0.as_ptr(),
                CommR::LEN,
                request.proof.0.as_ptr(),
                PostProof::LEN,
                request.candidates.0.as_ptr(),
                PostCandidates::LEN,
                &request.prover_id.0,
            )
        };
        if raw.is_null() {
            tracing::warn!(target: "post", "native verifier returned a null response");
            return PostVerifyResponse::failed(
                NULL_RESPONSE_STATUS,
                "native verifier returned no response",
            );
        }

        // SAFETY: `raw` is non-null and valid until destroyed, per the contract of `new`.
        let response = unsafe { copy_response(&*raw) };
        // SAFETY: `raw` came from `verify` and is destroyed exactly once.
        unsafe { (self.destroy)(raw) };
        response
    }
}
