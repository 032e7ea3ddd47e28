// Path: crates/cli/src/commands/mod.rs

pub mod keys;
pub mod spend;
pub mod template;
