// Path: crates/cli/src/commands/template.rs

use crate::util::{decode_hex, read_arg};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use vesta_api::template::SpendingTemplate;
use vesta_template::{SchedulePhase, Template};
use vesta_types::app::{TemplateRequest, TemplateResponse, TemplateType};
use vesta_types::config::TemplateEngineConfig;

#[derive(Parser, Debug)]
pub struct TemplateArgs {
    #[clap(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Build a template from a JSON request (literal or @file).
    Create { request: String },
    /// Decode canonical template hex (literal or @file).
    Inspect {
        hex: String,
        /// Numeric template type tag.
        #[clap(long, default_value_t = TemplateType::Post.tag())]
        tag: u16,
    },
    /// List the destinations that must sign a spend at a height.
    Signers {
        hex: String,
        #[clap(long)]
        height: u32,
        #[clap(long, default_value_t = TemplateType::Post.tag())]
        tag: u16,
    },
}

#[derive(Serialize, Debug)]
struct Inspection {
    #[serde(flatten)]
    response: TemplateResponse,
    id: String,
    valid_params: bool,
    height_max: Option<u64>,
}

#[derive(Serialize, Debug)]
struct Signers {
    height: u32,
    phase: &'static str,
    signers: Vec<String>,
}

pub fn run(args: TemplateArgs, config: &TemplateEngineConfig) -> Result<String> {
    match args.command {
        TemplateCommands::Create { request } => create(&read_arg(&request)?, config),
        TemplateCommands::Inspect { hex, tag } => inspect(&read_arg(&hex)?, tag, config),
        TemplateCommands::Signers { hex, height, tag } => {
            signers(&read_arg(&hex)?, tag, height, config)
        }
    }
}

pub(crate) fn decode_template(
    hex: &str,
    tag: u16,
    config: &TemplateEngineConfig,
) -> Result<Template> {
    let bytes = decode_hex(hex)?;
    Ok(Template::from_tag(tag, &bytes)
        .context("Failed to decode template")?
        .with_config(config))
}

fn create(request_json: &str, config: &TemplateEngineConfig) -> Result<String> {
    let request: TemplateRequest =
        serde_json::from_str(request_json).context("Invalid template request JSON")?;
    let template = Template::from_request(&request)?.with_config(config);
    if !template.validate_params() {
        tracing::warn!(target: "cli", id = %template.id(), "template parameters are invalid");
    }
    Ok(serde_json::to_string_pretty(&template.to_response())?)
}

fn inspect(hex: &str, tag: u16, config: &TemplateEngineConfig) -> Result<String> {
    let template = decode_template(hex, tag, config)?;
    let inspection = Inspection {
        response: template.to_response(),
        id: template.id().to_string(),
        valid_params: template.validate_params(),
        height_max: template.as_post().and_then(|t| t.height_max()),
    };
    Ok(serde_json::to_string_pretty(&inspection)?)
}

fn phase_name(phase: SchedulePhase) -> &'static str {
    match phase {
        SchedulePhase::Inactive => "inactive",
        SchedulePhase::BusinessPeriod => "business",
        SchedulePhase::CustomerPeriod => "customer",
    }
}

fn signers(hex: &str, tag: u16, height: u32, config: &TemplateEngineConfig) -> Result<String> {
    let template = decode_template(hex, tag, config)?;
    let phase = template
        .as_post()
        .map(|t| phase_name(t.phase(height)))
        .unwrap_or("unknown");
    let out = Signers {
        height,
        phase,
        signers: template
            .resolve_signers(height)
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}
