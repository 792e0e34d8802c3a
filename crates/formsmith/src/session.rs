//! The single owner of the current document and value store.
//!
//! Every edit arrives as a [`Command`], runs through the pure engine in
//! `formsmith_spec`, and replaces the state in one step. Subscribers only ever
//! see complete `(document, store)` pairs.

use formsmith_spec::codec::{self, CodecError};
use formsmith_spec::mutate::{self, MutationError};
use formsmith_spec::preview::{self, PreviewError, RenderedForm, ValueChange};
use formsmith_spec::spec::{ChoiceOption, FieldConfig, FieldId, FieldType, FormDocument};
use formsmith_spec::store::{InputValue, InputValueStore};
use formsmith_spec::validate::{self, SubmissionReport, ValidationWarning};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub document: FormDocument,
    pub store: InputValueStore,
}

impl FormState {
    pub fn new(document: FormDocument, store: InputValueStore) -> Self {
        Self { document, store }
    }

    /// State whose store has been reconciled against its document.
    pub fn reconciled(document: FormDocument, store: InputValueStore) -> Self {
        let store = store.reconcile(&document);
        Self { document, store }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddField(FieldType),
    /// A palette item dropped on the canvas; a blank token does nothing.
    DropPaletteItem(String),
    UpdateFieldConfig {
        id: FieldId,
        config: FieldConfig,
    },
    RemoveField(FieldId),
    ReorderField {
        from: usize,
        to: usize,
    },
    MoveField {
        active: FieldId,
        over: FieldId,
    },
    AddOption(FieldId),
    UpdateOption {
        id: FieldId,
        index: usize,
        option: ChoiceOption,
    },
    RemoveOption {
        id: FieldId,
        index: usize,
    },
    SetValue {
        key: String,
        value: InputValue,
    },
    Change(ValueChange),
    /// Swap in a freshly loaded state.
    Replace(FormState),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddField(_) => "add-field",
            Command::DropPaletteItem(_) => "drop-palette-item",
            Command::UpdateFieldConfig { .. } => "update-field-config",
            Command::RemoveField(_) => "remove-field",
            Command::ReorderField { .. } => "reorder-field",
            Command::MoveField { .. } => "move-field",
            Command::AddOption(_) => "add-option",
            Command::UpdateOption { .. } => "update-option",
            Command::RemoveOption { .. } => "remove-option",
            Command::SetValue { .. } => "set-value",
            Command::Change(_) => "change",
            Command::Replace(_) => "replace",
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Mutation(#[from] MutationError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug)]
pub struct FormSession {
    state: FormState,
    updates: watch::Sender<FormState>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::with_state(FormState::default())
    }

    pub fn with_state(state: FormState) -> Self {
        let state = FormState::reconciled(state.document, state.store);
        let (updates, _) = watch::channel(state.clone());
        Self { state, updates }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn document(&self) -> &FormDocument {
        &self.state.document
    }

    pub fn store(&self) -> &InputValueStore {
        &self.state.store
    }

    /// Receiver that always holds the latest committed state.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.updates.subscribe()
    }

    /// Run one command. On error the current state is kept as is.
    pub fn dispatch(&mut self, command: Command) -> Result<&FormState, SessionError> {
        let name = command.name();
        let next = match self.apply(command) {
            Ok(next) => next,
            Err(err) => {
                warn!(command = name, error = %err, "command rejected");
                return Err(err);
            }
        };
        self.state = next;
        self.updates.send_replace(self.state.clone());
        debug!(
            command = name,
            fields = self.state.document.len(),
            values = self.state.store.len(),
            "state committed"
        );
        Ok(&self.state)
    }

    fn apply(&self, command: Command) -> Result<FormState, SessionError> {
        let FormState { document, store } = &self.state;
        let document = match command {
            Command::AddField(kind) => mutate::add_field(document, kind),
            Command::DropPaletteItem(token) => mutate::add_field_token(document, &token)?,
            Command::UpdateFieldConfig { id, config } => {
                mutate::update_field_config(document, &id, config)?
            }
            Command::RemoveField(id) => mutate::remove_field(document, &id)?,
            Command::ReorderField { from, to } => mutate::reorder_field(document, from, to)?,
            Command::MoveField { active, over } => mutate::move_field(document, &active, &over)?,
            Command::AddOption(id) => mutate::add_option(document, &id)?,
            Command::UpdateOption { id, index, option } => {
                mutate::update_option(document, &id, index, option)?
            }
            Command::RemoveOption { id, index } => mutate::remove_option(document, &id, index)?,
            // Value edits leave the document alone and skip reconciliation.
            Command::SetValue { key, value } => {
                let id = FieldId::from(key.as_str());
                if document.field(&id).is_some_and(|field| field.kind().is_static()) {
                    return Err(PreviewError::StaticField(id).into());
                }
                return Ok(FormState::new(document.clone(), store.set_value(key, value)));
            }
            Command::Change(change) => {
                let store = preview::apply_change(document, store, change)?;
                return Ok(FormState::new(document.clone(), store));
            }
            Command::Replace(state) => {
                return Ok(FormState::reconciled(state.document, state.store));
            }
        };
        Ok(FormState::reconciled(document, store.clone()))
    }

    pub fn render(&self) -> RenderedForm {
        preview::render_form(&self.state.document, &self.state.store)
    }

    pub fn lint(&self) -> Vec<ValidationWarning> {
        validate::lint(&self.state.document)
    }

    pub fn check(&self) -> SubmissionReport {
        validate::check_submission(&self.state.document, &self.state.store)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(codec::serialize(&self.state.document, &self.state.store)?)
    }

    pub fn suggested_file_name(&self, fallback: &str) -> String {
        codec::suggested_file_name_or(&self.state.store, fallback)
    }

    /// Decode `bytes` and replace the state. A bad snapshot leaves the
    /// current form open and untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&FormState, SessionError> {
        let (document, store) = match codec::deserialize(bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(error = %err, "snapshot rejected");
                return Err(err.into());
            }
        };
        self.dispatch(Command::Replace(FormState::new(document, store)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_commands_do_not_touch_the_document() {
        let mut session = FormSession::new();
        session
            .dispatch(Command::AddField(FieldType::Email))
            .expect("add");
        let before = session.document().clone();
        session
            .dispatch(Command::SetValue {
                key: "anything".into(),
                value: "x".into(),
            })
            .expect("set");
        assert_eq!(session.document(), &before);
        assert!(session.store().contains_key("anything"));
    }

    #[test]
    fn static_fields_refuse_values() {
        let mut session = FormSession::new();
        session
            .dispatch(Command::AddField(FieldType::Heading))
            .expect("add");
        let id = session.document().fields()[0].id.clone();
        let before = session.state().clone();
        let err = session
            .dispatch(Command::SetValue {
                key: id.to_string(),
                value: "x".into(),
            })
            .expect_err("heading holds no value");
        assert!(matches!(err, SessionError::Preview(PreviewError::StaticField(_))));
        assert_eq!(session.state(), &before);
    }
}
