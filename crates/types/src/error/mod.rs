// Path: crates/types/src/error/mod.rs
//! Core error types for the Vesta template kernel.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while building, decoding or evaluating a spending template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template's canonical bytes could not be decoded.
    #[error("Template decode error: {0}")]
    Decode(String),
    /// One of the template parameters violates its invariant.
    #[error("Invalid template parameters: {0}")]
    InvalidParams(String),
    /// A request from the RPC layer was malformed.
    #[error("Invalid template request: {0}")]
    InvalidRequest(String),
    /// The request or bytes name a different template kind.
    #[error("Template type mismatch. Expected {expected}, got {got}")]
    TypeMismatch {
        /// The template kind this object implements.
        expected: String,
        /// The template kind that was supplied.
        got: String,
    },
    /// A signature or signature envelope was malformed.
    #[error("Invalid template signature: {0}")]
    Signature(String),
    /// A storage proof attachment was malformed.
    #[error("Invalid storage proof: {0}")]
    Proof(String),
}

impl ErrorCode for TemplateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "TEMPLATE_DECODE_ERROR",
            Self::InvalidParams(_) => "TEMPLATE_INVALID_PARAMS",
            Self::InvalidRequest(_) => "TEMPLATE_INVALID_REQUEST",
            Self::TypeMismatch { .. } => "TEMPLATE_TYPE_MISMATCH",
            Self::Signature(_) => "TEMPLATE_INVALID_SIGNATURE",
            Self::Proof(_) => "TEMPLATE_INVALID_PROOF",
        }
    }
}

impl From<CryptoError> for TemplateError {
    fn from(e: CryptoError) -> Self {
        TemplateError::Proof(e.to_string())
    }
}

/// Errors related to transaction processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// An error occurred during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred during deserialization.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
        }
    }
}

impl From<parity_scale_codec::Error> for TransactionError {
    fn from(e: parity_scale_codec::Error) -> Self {
        TransactionError::Deserialization(e.to_string())
    }
}

/// Errors from cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature failed cryptographic verification.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The provided key material is malformed or invalid for the specified algorithm.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The provided signature material is malformed or invalid for the specified algorithm.
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),
    /// An input to a cryptographic operation was invalid.
    #[error("Invalid input for operation: {0}")]
    InvalidInput(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::InvalidInput(_) => "CRYPTO_INVALID_INPUT",
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file was not valid TOML for the expected schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }
}
