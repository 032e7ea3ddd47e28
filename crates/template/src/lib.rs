// Path: crates/template/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]
//! # Vesta Templates
//!
//! Spending-authorization templates: content-addressed rule objects that decide
//! who may spend a locked output, at which heights, and against which proof.

pub mod kind;
pub mod post;
pub mod verifier;

pub use kind::Template;
pub use post::{PostTemplate, SchedulePhase, POST_TEMPLATE_DATA_LEN};
pub use verifier::native::NativePostVerifier;
