// Path: crates/types/src/app/transaction.rs

//! The minimal spending transaction that templates evaluate.

use crate::app::destination::Destination;
use crate::app::Hash32;
use crate::codec;
use crate::error::TransactionError;
use parity_scale_codec::{Decode, Encode};

/// A reference to an output being consumed.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct TxInput {
    /// The id of the transaction that created the output.
    pub prev_txid: Hash32,
    /// The output index within that transaction.
    pub n: u8,
}

/// A transaction spending outputs locked by a destination or a template.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Transaction {
    /// Format version.
    pub version: u16,
    /// Transaction kind.
    pub tx_type: u16,
    /// Creation timestamp (seconds).
    pub timestamp: u32,
    /// Height before which the outputs may not be spent.
    pub lock_until: u32,
    /// The fork anchor the transaction was built against.
    pub anchor: Hash32,
    /// Outputs consumed.
    pub inputs: Vec<TxInput>,
    /// Recipient of `amount`.
    pub send_to: Destination,
    /// Value transferred to `send_to`.
    pub amount: u64,
    /// Fee paid to the block producer.
    pub fee: u64,
    /// Attached data; spends of a PoSt template carry the proof here.
    pub data: Vec<u8>,
    /// Signature material, framed by the spent template.
    pub sig: Vec<u8>,
}

impl Transaction {
    /// The canonical bytes covered by the signature: the encoding with `sig` emptied.
    pub fn to_sign_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let unsigned = Self {
            sig: Vec::new(),
            ..self.clone()
        };
        codec::to_bytes_canonical(&unsigned).map_err(TransactionError::Serialization)
    }

    /// Decodes a transaction from its canonical encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        codec::from_bytes_canonical(bytes).map_err(TransactionError::Deserialization)
    }

    /// The canonical encoding of the whole transaction, signature included.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        codec::to_bytes_canonical(self).map_err(TransactionError::Serialization)
    }
}
