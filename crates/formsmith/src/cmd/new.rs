use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use formsmith_spec::preview::ValueChange;

use crate::cli::Context;
use crate::io;
use crate::session::{Command, FormSession};

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Document name; also names the file
    #[arg(value_name = "NAME")]
    pub name: String,
    /// Target directory (defaults to output_dir from the config, then ".")
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub async fn run(args: NewArgs, ctx: &Context) -> Result<()> {
    let mut session = FormSession::new();
    session.dispatch(Command::Change(ValueChange::DocumentName(args.name)))?;

    let dir = args
        .dir
        .or_else(|| ctx.config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let fallback = &ctx.config.fallback_file_name;
    let target = io::form_path(&dir, session.state(), fallback);
    if target.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }

    let path = io::write_form(&dir, session.state(), fallback).await?;
    println!("{}", path.display());
    Ok(())
}
