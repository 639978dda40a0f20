//! ---
//! plt_section: "05-cli"
//! plt_subsection: "binary"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Recipe and fixture inspection subcommands."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args};
use plt_common::HarnessConfig;
use plt_fixtures::RecipeTemplate;
use plt_testharness::HarnessBootstrap;
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct RecipeCommand {
    /// Template name, e.g. `det-sync-http-single-model`.
    #[arg(value_name = "NAME", required_unless_present = "list")]
    name: Option<String>,

    /// List available template names.
    #[arg(long, action = ArgAction::SetTrue)]
    list: bool,
}

pub fn run_recipe(command: RecipeCommand) -> Result<()> {
    if command.list {
        for template in RecipeTemplate::ALL {
            println!("{}", template.name());
        }
        return Ok(());
    }

    let name = command
        .name
        .ok_or_else(|| anyhow!("a template name is required"))?;
    let template = RecipeTemplate::from_name(&name).ok_or_else(|| {
        anyhow!(
            "unknown template `{}`; run `pltctl recipe --list` for the available names",
            name
        )
    })?;
    let body = template
        .render()
        .with_context(|| format!("failed to render template {}", name))?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[derive(Debug, Args)]
pub struct FixturesCommand {
    /// Print each image as base64 instead of its size.
    #[arg(long, action = ArgAction::SetTrue)]
    base64: bool,
}

pub fn run_fixtures(command: FixturesCommand, config: &HarnessConfig) -> Result<()> {
    let context = HarnessBootstrap::new(config.clone())
        .with_fixtures(true)
        .build()?;
    let fixtures = context
        .fixtures()
        .ok_or_else(|| anyhow!("fixtures were not loaded"))?;

    for (image, raw) in fixtures.images() {
        if command.base64 {
            println!("{}\t{}", image.file_name(), fixtures.image_base64(image));
        } else {
            println!("{}\t{} bytes", image.file_name(), raw.len());
        }
    }
    println!(
        "{}\t{} bytes",
        plt_fixtures::assets::MODEL_ARCHIVE_FILE,
        fixtures.model_archive().len()
    );
    Ok(())
}

#[derive(Debug, Args)]
pub struct ParamsCommand {
    /// User id for the JWT stub headers; random when omitted.
    #[arg(long = "user-uid", value_name = "UUID")]
    user_uid: Option<Uuid>,
}

pub fn run_params(command: ParamsCommand, config: &HarnessConfig) -> Result<()> {
    let mut bootstrap = HarnessBootstrap::new(config.clone());
    if let Some(uid) = command.user_uid {
        bootstrap = bootstrap.with_user_uid(uid);
    }
    let context = bootstrap.build()?;
    println!("{}", serde_json::to_string_pretty(context.params())?);
    Ok(())
}
