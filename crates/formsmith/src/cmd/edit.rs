use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow, bail};
use clap::{Args, Subcommand};
use formsmith_spec::spec::{ChoiceOption, FieldConfig, FieldId};
use formsmith_spec::store::{DOCUMENT_NAME_KEY, InputValue};
use serde_json::Value;

use super::{open, save};
use crate::session::Command;

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    /// Field type token, e.g. text-input or checkbox-group
    #[arg(value_name = "TYPE")]
    pub kind: String,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    #[arg(value_name = "FIELD_ID")]
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    /// Current position (0-based)
    pub from: usize,
    /// New position (0-based)
    pub to: usize,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OptionCommand {
    /// Append an option
    Add(OptionAddArgs),
    /// Remove the option at an index, clearing defaults that used its value
    Remove(OptionRemoveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OptionAddArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    #[arg(value_name = "FIELD_ID")]
    pub id: String,
    #[arg(long)]
    pub label: String,
    #[arg(long)]
    pub value: String,
}

#[derive(Args, Debug, Clone)]
pub struct OptionRemoveArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    #[arg(value_name = "FIELD_ID")]
    pub id: String,
    pub index: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigureArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    #[arg(value_name = "FIELD_ID")]
    pub id: String,
    /// JSON object merged into the field's props, e.g. '{"required":true}'
    #[arg(long, value_name = "JSON")]
    pub props: String,
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    #[arg(value_name = "FORM")]
    pub form: PathBuf,
    /// Field id, or document-name
    #[arg(value_name = "KEY")]
    pub key: String,
    #[arg(value_name = "VALUE", num_args = 1.., required = true)]
    pub values: Vec<String>,
    /// Store the values as a list even when there is only one
    #[arg(long)]
    pub list: bool,
}

pub async fn add(args: AddArgs) -> Result<()> {
    let mut session = open(&args.form).await?;
    let before = session.document().len();
    session.dispatch(Command::DropPaletteItem(args.kind))?;
    if session.document().len() == before {
        bail!("no field type given");
    }
    save(&args.form, &session).await?;
    if let Some(field) = session.document().fields().last() {
        println!("{}", field.id);
    }
    Ok(())
}

pub async fn remove(args: RemoveArgs) -> Result<()> {
    let mut session = open(&args.form).await?;
    session.dispatch(Command::RemoveField(FieldId::from(args.id)))?;
    save(&args.form, &session).await
}

pub async fn move_field(args: MoveArgs) -> Result<()> {
    let mut session = open(&args.form).await?;
    session.dispatch(Command::ReorderField {
        from: args.from,
        to: args.to,
    })?;
    save(&args.form, &session).await
}

pub async fn option(command: OptionCommand) -> Result<()> {
    match command {
        OptionCommand::Add(args) => {
            let mut session = open(&args.form).await?;
            let id = FieldId::from(args.id);
            let state = session.dispatch(Command::AddOption(id.clone()))?;
            let index = state
                .document
                .field(&id)
                .and_then(|field| field.config.options())
                .map(|options| options.len().saturating_sub(1))
                .unwrap_or_default();
            session.dispatch(Command::UpdateOption {
                id,
                index,
                option: ChoiceOption::new(args.label, args.value),
            })?;
            save(&args.form, &session).await
        }
        OptionCommand::Remove(args) => {
            let mut session = open(&args.form).await?;
            session.dispatch(Command::RemoveOption {
                id: FieldId::from(args.id),
                index: args.index,
            })?;
            save(&args.form, &session).await
        }
    }
}

pub async fn configure(args: ConfigureArgs) -> Result<()> {
    let mut session = open(&args.form).await?;
    let id = FieldId::from(args.id);
    let field = session
        .document()
        .field(&id)
        .ok_or_else(|| anyhow!("field '{}' not found", id))?;

    let patch: Value = serde_json::from_str(&args.props).context("--props is not valid JSON")?;
    let Some(patch) = patch.as_object() else {
        bail!("--props must be a JSON object");
    };
    let mut current = serde_json::to_value(&field.config)?;
    if let Some(props) = current.get_mut("props").and_then(Value::as_object_mut) {
        for (key, value) in patch {
            props.insert(key.clone(), value.clone());
        }
    }
    let config: FieldConfig = serde_json::from_value(current)
        .with_context(|| format!("props do not fit a {} field", field.kind()))?;

    session.dispatch(Command::UpdateFieldConfig { id, config })?;
    save(&args.form, &session).await
}

pub async fn set(args: SetArgs) -> Result<()> {
    let mut session = open(&args.form).await?;
    let known = session.document().contains(&FieldId::from(args.key.as_str()));
    if args.key != DOCUMENT_NAME_KEY && !known {
        bail!("field '{}' not found", args.key);
    }
    let value = if args.list || args.values.len() > 1 {
        InputValue::List(args.values)
    } else {
        InputValue::Text(args.values.concat())
    };
    session.dispatch(Command::SetValue {
        key: args.key,
        value,
    })?;
    save(&args.form, &session).await
}
