// Path: crates/cli/src/commands/spend.rs

use crate::commands::template::decode_template;
use crate::util::{decode_hash, decode_hex, read_arg};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Mutex;
use vesta_api::proof::{PostVerifier, PostVerifyRequest, PostVerifyResponse};
use vesta_api::template::{SpendContext, SpendingTemplate};
use vesta_crypto::algorithms::hash::sha256;
use vesta_telemetry::time::Timer;
use vesta_types::app::{TemplateType, Transaction};
use vesta_types::config::TemplateEngineConfig;

#[derive(Parser, Debug)]
pub struct SpendArgs {
    #[clap(subcommand)]
    pub command: SpendCommands,
}

#[derive(Subcommand, Debug)]
pub enum SpendCommands {
    /// Run every spend rule except the proof check itself, which is recorded but
    /// not evaluated.
    Check {
        /// Canonical template hex (literal or @file).
        #[clap(long)]
        template: String,
        /// SCALE-encoded transaction hex (literal or @file).
        #[clap(long)]
        tx: String,
        #[clap(long)]
        height: u32,
        #[clap(long)]
        value_in: u64,
        /// Hash of the block the spend is evaluated in (hex).
        #[clap(long)]
        block_hash: String,
        #[clap(long, default_value_t = TemplateType::Post.tag())]
        tag: u16,
    },
}

/// What a dry run would have sent to the proof verifier.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct ForwardedProof {
    sector_size: u64,
    challenge_count: u64,
    randomness: String,
    sector_ids: String,
    prover_id: String,
}

/// Accepts every proof and remembers the request, so a dry run can show how
/// far a spend got.
#[derive(Default)]
struct DryRunVerifier {
    seen: Mutex<Option<ForwardedProof>>,
}

impl PostVerifier for DryRunVerifier {
    fn verify_post(&self, request: &PostVerifyRequest<'_>) -> PostVerifyResponse {
        let forwarded = ForwardedProof {
            sector_size: request.sector_size,
            challenge_count: request.challenge_count,
            randomness: hex::encode(request.randomness.as_bytes()),
            sector_ids: hex::encode(request.sector_ids.as_bytes()),
            prover_id: hex::encode(request.prover_id.as_bytes()),
        };
        if let Ok(mut seen) = self.seen.lock() {
            *seen = Some(forwarded);
        }
        PostVerifyResponse::accepted()
    }
}

#[derive(Serialize, Debug)]
struct CheckReport {
    /// All rules before the proof check passed.
    rules_passed: bool,
    /// The request the proof verifier would receive. Absent if an earlier rule failed.
    proof_request: Option<ForwardedProof>,
    /// Destinations resolved from the signing height in `tx.sig`, if present.
    signers: Option<Vec<String>>,
    /// Whether the signature after the height prefix in `tx.sig` covers the
    /// transaction digest for the party scheduled at `height`.
    signature_valid: Option<bool>,
    /// SHA-256 of the transaction's sign bytes (hex).
    digest: String,
}

pub fn run(args: SpendArgs, config: &TemplateEngineConfig) -> Result<String> {
    match args.command {
        SpendCommands::Check {
            template,
            tx,
            height,
            value_in,
            block_hash,
            tag,
        } => {
            let template = decode_template(&read_arg(&template)?, tag, config)?;
            let tx = Transaction::from_bytes(&decode_hex(&read_arg(&tx)?)?)
                .map_err(|e| anyhow!("Invalid transaction: {}", e))?;
            let block_hash = decode_hash(&block_hash)?;
            let report = check(&template, &tx, height, value_in, &block_hash)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn check(
    template: &vesta_template::Template,
    tx: &Transaction,
    height: u32,
    value_in: u64,
    block_hash: &[u8; 32],
) -> Result<CheckReport> {
    let digest = sha256(
        tx.to_sign_bytes()
            .map_err(|e| anyhow!("Failed to encode sign bytes: {}", e))?,
    );
    let verifier = DryRunVerifier::default();
    let ctx = SpendContext {
        block_hash,
        height,
        value_in,
    };
    let rules_passed = {
        let _timer = Timer::new("spend_check");
        template.verify_transaction(tx, &ctx, &verifier)
    };
    let proof_request = verifier.seen.lock().ok().and_then(|seen| seen.clone());
    let signers = template
        .as_post()
        .and_then(|t| t.sign_destinations(tx).ok())
        .map(|set| set.iter().map(ToString::to_string).collect());
    // `tx.sig` is the 4-byte signing height followed by the signature itself.
    let signature_valid = match (template.as_post(), tx.sig.get(4..)) {
        (Some(post), Some(sig)) => post
            .verify_tx_signature(&digest, &tx.anchor, &tx.send_to, sig, height)
            .ok(),
        _ => None,
    };
    Ok(CheckReport {
        rules_passed,
        proof_request,
        signers,
        signature_valid,
        digest: hex::encode(digest),
    })
}
