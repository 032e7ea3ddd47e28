// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use vesta_types::error::{
    ConfigError, CryptoError, ErrorCode, TemplateError, TransactionError,
};
pub use vesta_types::Result;
