// Path: crates/cli/src/commands/keys.rs

use crate::util::{decode_hash, decode_hex, read_arg};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use vesta_api::crypto::{SerializableKey, SigningKey, SigningKeyPair};
use vesta_crypto::sign::eddsa::{Ed25519KeyPair, Ed25519PrivateKey, Ed25519PublicKey};
use vesta_types::app::Destination;

#[derive(Parser, Debug)]
pub struct KeysArgs {
    #[clap(subcommand)]
    pub command: KeysCommands,
}

#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// Generate a new Ed25519 keypair and its destination.
    Generate,
    /// Derive the destination of a public key (hex).
    Inspect { hex_key: String },
    /// Sign a 32-byte digest (hex) with a private key seed (hex or @file).
    Sign {
        #[clap(long)]
        seed: String,
        digest: String,
    },
}

#[derive(Serialize, Debug)]
struct Identity {
    seed: Option<String>,
    public_key: String,
    destination: String,
}

fn identity_of(public_key: &Ed25519PublicKey, seed: Option<String>) -> Identity {
    Identity {
        seed,
        public_key: hex::encode(public_key.to_bytes()),
        destination: Destination::from_pubkey(public_key.to_array()).to_string(),
    }
}

pub fn run(args: KeysArgs) -> Result<String> {
    match args.command {
        KeysCommands::Generate => {
            let kp = Ed25519KeyPair::generate().map_err(|e| anyhow!("Gen failed: {}", e))?;
            let seed = hex::encode(kp.private_key().to_bytes());
            Ok(serde_json::to_string_pretty(&identity_of(
                &kp.public_key(),
                Some(seed),
            ))?)
        }
        KeysCommands::Inspect { hex_key } => {
            let bytes = decode_hex(&hex_key)?;
            let pk = Ed25519PublicKey::from_bytes(&bytes)
                .map_err(|e| anyhow!("Invalid Ed25519 key bytes: {}", e))?;
            Ok(serde_json::to_string_pretty(&identity_of(&pk, None))?)
        }
        KeysCommands::Sign { seed, digest } => sign_digest(&read_arg(&seed)?, &digest),
    }
}

fn sign_digest(seed_hex: &str, digest_hex: &str) -> Result<String> {
    let sk = Ed25519PrivateKey::from_bytes(&decode_hex(seed_hex)?)
        .map_err(|e| anyhow!("Invalid seed: {}", e))?;
    let digest = decode_hash(digest_hex)?;
    let sig = sk
        .sign(&digest)
        .map_err(|e| anyhow!("Signing failed: {}", e))?;
    Ok(hex::encode(sig.to_bytes()))
}
