// Path: crates/types/src/app/post.rs

//! Fixed-layout buffers exchanged with the native Proof-of-Spacetime (PoSt) verifier.
//!
//! The verifier reads raw memory at fixed sizes, so every buffer handed to it is a
//! distinct type that can only be built from a slice of exactly the right length.
//! Length checks happen here, once, instead of as offset arithmetic in the engine.

use crate::error::CryptoError;
use parity_scale_codec::{Decode, Encode, Input, Output};
use std::fmt;

/// Length of the packed commitment payload stored in a PoSt template.
pub const POST_BASE_LEN: usize = SectorIds::LEN + CommR::LEN + ProverId::LEN;
/// Length of the SNARK proof carried by a spending transaction.
pub const POST_PROOF_LEN: usize = 384;
/// Length of the candidate (winner) record carried by a spending transaction.
pub const POST_CANDIDATES_LEN: usize = 160;
/// Index of the framing byte removed from a transaction's data before the split.
pub const POST_FRAMING_BYTE_OFFSET: usize = 20;

macro_rules! fixed_buffer {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Exact length in bytes.
            pub const LEN: usize = $len;

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = CryptoError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; $len]>::try_from(bytes).map(Self).map_err(|_| {
                    CryptoError::InvalidInput(format!(
                        "{} expects {} bytes, got {}",
                        stringify!($name),
                        $len,
                        bytes.len()
                    ))
                })
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }
    };
}

fixed_buffer!(
    /// Challenge randomness. The block hash is used verbatim.
    Randomness,
    32
);
fixed_buffer!(
    /// Sector identifiers (one little-endian `u64`).
    SectorIds,
    8
);
fixed_buffer!(
    /// Flattened replica commitment digests (one 32-byte CommR).
    CommR,
    32
);
fixed_buffer!(
    /// SNARK proof bytes.
    PostProof,
    384
);
fixed_buffer!(
    /// Candidate (winner) record bytes.
    PostCandidates,
    160
);
fixed_buffer!(
    /// The prover's identifier.
    ProverId,
    32
);

/// The commitment payload of a PoSt template: sector ids at offset 0, CommR at
/// offset 8 and the prover id at offset 40, packed contiguously.
///
/// On the wire it is a length-prefixed byte vector whose length must be exactly
/// [`POST_BASE_LEN`]; decoding any other length fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PostBase {
    /// Sector identifiers.
    pub sector_ids: SectorIds,
    /// Replica commitment.
    pub comm_r: CommR,
    /// Prover identifier.
    pub prover_id: ProverId,
}

impl PostBase {
    /// The packed 72-byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        [
            self.sector_ids.as_bytes().as_slice(),
            self.comm_r.as_bytes().as_slice(),
            self.prover_id.as_bytes().as_slice(),
        ]
        .concat()
    }

    /// Parses the packed layout. The slice must be exactly [`POST_BASE_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != POST_BASE_LEN {
            return Err(CryptoError::InvalidInput(format!(
                "post_base expects {} bytes, got {}",
                POST_BASE_LEN,
                bytes.len()
            )));
        }
        let (sector_ids, rest) = bytes.split_at(SectorIds::LEN);
        let (comm_r, prover_id) = rest.split_at(CommR::LEN);
        Ok(Self {
            sector_ids: SectorIds::try_from(sector_ids)?,
            comm_r: CommR::try_from(comm_r)?,
            prover_id: ProverId::try_from(prover_id)?,
        })
    }

    /// Lower-case hex of the packed layout.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses a hex string holding the packed layout.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes =
            hex::decode(s).map_err(|e| CryptoError::InvalidInput(format!("bad hex: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl Encode for PostBase {
    fn size_hint(&self) -> usize {
        POST_BASE_LEN + 2
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.to_bytes().encode_to(dest)
    }
}

impl Decode for PostBase {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let bytes = Vec::<u8>::decode(input)?;
        Self::from_slice(&bytes)
            .map_err(|_| parity_scale_codec::Error::from("post_base length mismatch"))
    }
}

/// The proof material a spending transaction carries in its data field.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PostAttachment {
    /// The SNARK proof.
    pub proof: PostProof,
    /// The candidate record.
    pub candidates: PostCandidates,
}

impl PostAttachment {
    /// Extracts the attachment from a transaction's data.
    ///
    /// The byte at [`POST_FRAMING_BYTE_OFFSET`] is removed first; what remains must be
    /// exactly `384 + 160` bytes, proof first.
    pub fn from_tx_data(data: &[u8]) -> Result<Self, CryptoError> {
        if data.len() <= POST_FRAMING_BYTE_OFFSET {
            return Err(CryptoError::InvalidInput(format!(
                "transaction data too short for framing byte: {} bytes",
                data.len()
            )));
        }
        let (head, tail) = data.split_at(POST_FRAMING_BYTE_OFFSET);
        let payload: Vec<u8> = head
            .iter()
            .chain(tail.iter().skip(1))
            .copied()
            .collect();
        if payload.len() != POST_PROOF_LEN + POST_CANDIDATES_LEN {
            return Err(CryptoError::InvalidInput(format!(
                "post attachment expects {} bytes, got {}",
                POST_PROOF_LEN + POST_CANDIDATES_LEN,
                payload.len()
            )));
        }
        let (proof, candidates) = payload.split_at(POST_PROOF_LEN);
        Ok(Self {
            proof: PostProof::try_from(proof)?,
            candidates: PostCandidates::try_from(candidates)?,
        })
    }

    /// Builds transaction data for this attachment, inserting `framing_byte` at
    /// [`POST_FRAMING_BYTE_OFFSET`].
    pub fn to_tx_data(&self, framing_byte: u8) -> Vec<u8> {
        let (head, tail) = self.proof.as_bytes().split_at(POST_FRAMING_BYTE_OFFSET);
        [
            head,
            std::slice::from_ref(&framing_byte),
            tail,
            self.candidates.as_bytes().as_slice(),
        ]
        .concat()
    }
}
