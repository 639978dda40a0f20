//! ---
//! plt_section: "05-cli"
//! plt_subsection: "binary"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Endpoint printing subcommand."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{Args, ValueEnum};
use plt_common::HarnessConfig;
use plt_endpoints::{EndpointSet, ResolverVariant};
use tracing::debug;

#[derive(Debug, Args)]
pub struct EndpointsCommand {
    /// Endpoint layout to resolve.
    #[arg(long, value_enum, default_value_t = VariantArg::Topology)]
    variant: VariantArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Topology,
    Gateway,
}

impl From<VariantArg> for ResolverVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Topology => ResolverVariant::Topology,
            VariantArg::Gateway => ResolverVariant::Gateway,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Pretty-printed JSON object keyed by export name.
    Json,
    /// `name=value` lines suitable for `export`/dotenv files.
    Env,
}

pub fn run(command: EndpointsCommand, config: &HarnessConfig) -> Result<()> {
    let variant = ResolverVariant::from(command.variant);
    let endpoints = variant.resolve(&config.target)?;
    debug!(variant = %variant, count = endpoints.len(), "printing endpoints");
    print!("{}", render(&endpoints, command.format)?);
    Ok(())
}

fn render(endpoints: &EndpointSet, format: FormatArg) -> Result<String> {
    match format {
        FormatArg::Json => Ok(format!("{}\n", serde_json::to_string_pretty(endpoints)?)),
        FormatArg::Env => Ok(endpoints
            .iter()
            .map(|(key, value)| format!("{}={}\n", key.export_name(), value))
            .collect()),
    }
}
