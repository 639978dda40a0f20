//! ---
//! plt_section: "05-cli"
//! plt_subsection: "binary"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "CLI exposing resolved endpoints and request templates to runners."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use plt_common::{HarnessConfig, LoadedHarnessConfig};
use tracing::debug;

mod endpoints;
mod payloads;

const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["loadtest.toml", "configs/loadtest.toml"];

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Pipeline load-test fixture utility",
    long_about = None
)]
struct Cli {
    /// Configuration file; takes precedence over `PLT_CONFIG`. Environment
    /// variables still override its values.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Also write JSON logs to the directory configured under `[logging]`.
    #[arg(long = "log-to-file", global = true, action = ArgAction::SetTrue)]
    log_to_file: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Print resolved endpoints")]
    Endpoints(endpoints::EndpointsCommand),
    #[command(about = "Print a recipe or payload template")]
    Recipe(payloads::RecipeCommand),
    #[command(about = "Inspect binary fixtures under TEST_FOLDER_ABS_PATH")]
    Fixtures(payloads::FixturesCommand),
    #[command(about = "Print request header/metadata parameter sets")]
    Params(payloads::ParamsCommand),
}

fn load_config(explicit: Option<&PathBuf>) -> Result<LoadedHarnessConfig> {
    match explicit {
        Some(path) if !path.exists() => bail!("config file {} does not exist", path.display()),
        Some(path) => HarnessConfig::load_file(path),
        None => HarnessConfig::load_with_source(&DEFAULT_CONFIG_CANDIDATES),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_ref())?;
    if cli.log_to_file {
        plt_common::init_tracing("pltctl", &loaded.config.logging)?;
    } else {
        plt_common::init_console(&loaded.config.logging);
    }
    debug!(source = ?loaded.source, "configuration loaded");

    match cli.command {
        Commands::Endpoints(cmd) => endpoints::run(cmd, &loaded.config)?,
        Commands::Recipe(cmd) => payloads::run_recipe(cmd)?,
        Commands::Fixtures(cmd) => payloads::run_fixtures(cmd, &loaded.config)?,
        Commands::Params(cmd) => payloads::run_params(cmd, &loaded.config)?,
    }
    Ok(())
}
