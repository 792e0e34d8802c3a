use anyhow::Result;
use formsmith_spec::document_schema;

use crate::cli::Context;
use crate::config::Frontend;

pub fn palette(ctx: &Context) -> Result<()> {
    let entries = formsmith_spec::palette::palette();
    match ctx.frontend {
        Frontend::Json => println!("{}", serde_json::to_string_pretty(entries)?),
        Frontend::Text => {
            for entry in entries {
                println!(
                    "{:<15} {:<14} {}",
                    entry.kind.as_str(),
                    entry.label,
                    entry.description
                );
            }
        }
    }
    Ok(())
}

pub fn schema() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&document_schema()?)?);
    Ok(())
}
