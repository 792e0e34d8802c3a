use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use formsmith_spec::preview::{render_json_ui, render_text};

use super::open;
use crate::cli::Context;
use crate::config::Frontend;

#[derive(Args, Debug, Clone)]
pub struct FormArg {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
}

pub async fn render(args: FormArg, ctx: &Context) -> Result<()> {
    let session = open(&args.form).await?;
    let form = session.render();
    match ctx.frontend {
        Frontend::Text => println!("{}", render_text(&form)),
        Frontend::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&form)?)?),
    }
    Ok(())
}

pub async fn lint(args: FormArg, ctx: &Context) -> Result<()> {
    let session = open(&args.form).await?;
    let warnings = session.lint();
    match ctx.frontend {
        Frontend::Json => println!("{}", serde_json::to_string_pretty(&warnings)?),
        Frontend::Text if warnings.is_empty() => println!("no warnings"),
        Frontend::Text => {
            for warning in &warnings {
                println!(
                    "warning[{}] {}: {}",
                    warning.code.as_str(),
                    warning.field_id,
                    warning.message
                );
            }
        }
    }
    Ok(())
}

/// Prints the report and fails when the values would not submit.
pub async fn check(args: FormArg, ctx: &Context) -> Result<()> {
    let session = open(&args.form).await?;
    let report = session.check();
    match ctx.frontend {
        Frontend::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Frontend::Text => {
            for id in &report.missing_required {
                println!("missing required: {}", id);
            }
            for error in &report.errors {
                println!("error[{}] {}: {}", error.code, error.field_id, error.message);
            }
            if report.valid {
                println!("ok");
            }
        }
    }
    if !report.valid {
        bail!(
            "form does not submit: {} missing, {} invalid",
            report.missing_required.len(),
            report.errors.len()
        );
    }
    Ok(())
}
