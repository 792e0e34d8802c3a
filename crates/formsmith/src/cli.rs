use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::cmd::{
    self,
    edit::{AddArgs, ConfigureArgs, MoveArgs, OptionCommand, RemoveArgs, SetArgs},
    new::NewArgs,
    preview::FormArg,
};
use crate::config::{Frontend, StudioConfig, load_config};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "formsmith",
    about = "Design forms and preview them from the command line",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Settings file; defaults to <config dir>/formsmith/config.toml
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for render, lint, check and palette
    #[arg(long, value_enum, global = true)]
    format: Option<Frontend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty named form
    New(NewArgs),
    /// Append a field of the given type and print its id
    Add(AddArgs),
    /// Remove a field
    Remove(RemoveArgs),
    /// Move the field at one position to another
    Move(MoveArgs),
    /// Edit the options of a choice field
    #[command(subcommand, name = "option")]
    Options(OptionCommand),
    /// Merge JSON props into a field's configuration
    Configure(ConfigureArgs),
    /// Set a preview value (or the document name)
    Set(SetArgs),
    /// Render the live preview
    Render(FormArg),
    /// Report authoring warnings
    Lint(FormArg),
    /// Check current values against the native constraints
    Check(FormArg),
    /// List the field types that can be added
    Palette,
    /// Print the JSON Schema of the form file format
    Schema,
}

/// Resolved settings shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: StudioConfig,
    pub frontend: Frontend,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.log_filter, cli.verbose);
    let ctx = Context {
        frontend: cli.format.unwrap_or(config.frontend),
        config,
    };
    tracing::debug!(frontend = ?ctx.frontend, "configuration loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run(cli.command, &ctx))
}

async fn run(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::New(args) => cmd::new::run(args, ctx).await,
        Commands::Add(args) => cmd::edit::add(args).await,
        Commands::Remove(args) => cmd::edit::remove(args).await,
        Commands::Move(args) => cmd::edit::move_field(args).await,
        Commands::Options(command) => cmd::edit::option(command).await,
        Commands::Configure(args) => cmd::edit::configure(args).await,
        Commands::Set(args) => cmd::edit::set(args).await,
        Commands::Render(args) => cmd::preview::render(args, ctx).await,
        Commands::Lint(args) => cmd::preview::lint(args, ctx).await,
        Commands::Check(args) => cmd::preview::check(args, ctx).await,
        Commands::Palette => cmd::catalog::palette(ctx),
        Commands::Schema => cmd::catalog::schema(),
    }
}
