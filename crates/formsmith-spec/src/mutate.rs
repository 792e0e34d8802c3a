//! Pure document transforms. Every operation borrows the current document and
//! returns a new one; on error the caller keeps what it had.

use thiserror::Error;

use crate::spec::document::{DuplicateFieldId, FormDocument};
use crate::spec::field::{
    ChoiceOption, Field, FieldConfig, FieldId, FieldType, UnknownFieldType,
};

/// Errors raised by the mutation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error(transparent)]
    UnknownFieldType(#[from] UnknownFieldType),
    #[error(transparent)]
    DuplicateFieldId(#[from] DuplicateFieldId),
    #[error("field '{0}' not found")]
    FieldNotFound(FieldId),
    #[error("index {index} out of bounds for {len} field(s)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("option index {index} out of bounds for field '{id}' with {len} option(s)")]
    OptionOutOfBounds { id: FieldId, index: usize, len: usize },
    #[error("field '{id}' of type {kind} has no options")]
    NotAChoiceField { id: FieldId, kind: FieldType },
    #[error("field '{id}' is a {expected} field, got a {actual} config")]
    TypeMismatch {
        id: FieldId,
        expected: FieldType,
        actual: FieldType,
    },
}

/// Append a field of `kind` with a fresh id and the type's default config.
pub fn add_field(doc: &FormDocument, kind: FieldType) -> FormDocument {
    let mut fields = doc.fields().to_vec();
    fields.push(Field::new(FieldId::generate(), FieldConfig::default_for(kind)));
    FormDocument::from_unique_fields(fields)
}

/// Like [`add_field`] with a caller-chosen id, which must not be in use.
pub fn add_field_with_id(
    doc: &FormDocument,
    id: FieldId,
    kind: FieldType,
) -> Result<FormDocument, MutationError> {
    if doc.contains(&id) {
        return Err(DuplicateFieldId(id).into());
    }
    let mut fields = doc.fields().to_vec();
    fields.push(Field::new(id, FieldConfig::default_for(kind)));
    Ok(FormDocument::from_unique_fields(fields))
}

/// Add from a palette/drag token. A blank token leaves the document as is.
pub fn add_field_token(doc: &FormDocument, token: &str) -> Result<FormDocument, MutationError> {
    match FieldType::from_token(token)? {
        Some(kind) => Ok(add_field(doc, kind)),
        None => Ok(doc.clone()),
    }
}

/// Replace the config of field `id`. The field's type cannot change.
pub fn update_field_config(
    doc: &FormDocument,
    id: &FieldId,
    config: FieldConfig,
) -> Result<FormDocument, MutationError> {
    edit_field(doc, id, |field| {
        if field.kind() != config.kind() {
            return Err(MutationError::TypeMismatch {
                id: field.id.clone(),
                expected: field.kind(),
                actual: config.kind(),
            });
        }
        field.config = config;
        Ok(())
    })
}

pub fn remove_field(doc: &FormDocument, id: &FieldId) -> Result<FormDocument, MutationError> {
    if !doc.contains(id) {
        return Err(MutationError::FieldNotFound(id.clone()));
    }
    let fields = doc
        .fields()
        .iter()
        .filter(|field| &field.id != id)
        .cloned()
        .collect();
    Ok(FormDocument::from_unique_fields(fields))
}

/// Array-move: the field at `from` ends up at `to`, the ones in between shift
/// by one. Both indices must be in bounds.
pub fn reorder_field(
    doc: &FormDocument,
    from: usize,
    to: usize,
) -> Result<FormDocument, MutationError> {
    let len = doc.len();
    for index in [from, to] {
        if index >= len {
            return Err(MutationError::IndexOutOfBounds { index, len });
        }
    }
    let mut fields = doc.fields().to_vec();
    if from != to {
        let moved = fields.remove(from);
        fields.insert(to, moved);
    }
    Ok(FormDocument::from_unique_fields(fields))
}

/// Drag-end form of [`reorder_field`]: move `active` to where `over` sits.
pub fn move_field(
    doc: &FormDocument,
    active: &FieldId,
    over: &FieldId,
) -> Result<FormDocument, MutationError> {
    let from = doc
        .position(active)
        .ok_or_else(|| MutationError::FieldNotFound(active.clone()))?;
    let to = doc
        .position(over)
        .ok_or_else(|| MutationError::FieldNotFound(over.clone()))?;
    reorder_field(doc, from, to)
}

/// Append an empty option to a choice field.
pub fn add_option(doc: &FormDocument, id: &FieldId) -> Result<FormDocument, MutationError> {
    edit_field(doc, id, |field| {
        choice_options(field)?.push(ChoiceOption::default());
        Ok(())
    })
}

pub fn update_option(
    doc: &FormDocument,
    id: &FieldId,
    index: usize,
    option: ChoiceOption,
) -> Result<FormDocument, MutationError> {
    edit_field(doc, id, |field| {
        let field_id = field.id.clone();
        let options = choice_options(field)?;
        let len = options.len();
        let slot = options
            .get_mut(index)
            .ok_or(MutationError::OptionOutOfBounds {
                id: field_id,
                index,
                len,
            })?;
        *slot = option;
        Ok(())
    })
}

/// Remove one option and drop any default that pointed at its value.
///
/// Matching is by value string only, so with duplicate values every default
/// sharing the removed value goes. An emptied `default_values` list collapses
/// to `None`.
pub fn remove_option(
    doc: &FormDocument,
    id: &FieldId,
    index: usize,
) -> Result<FormDocument, MutationError> {
    edit_field(doc, id, |field| {
        let field_id = field.id.clone();
        let options = choice_options(field)?;
        if index >= options.len() {
            return Err(MutationError::OptionOutOfBounds {
                id: field_id,
                index,
                len: options.len(),
            });
        }
        let removed = options.remove(index);
        if removed.value.is_empty() {
            return Ok(());
        }

        if let Some(default) = field.config.default_value_mut()
            && *default == removed.value
        {
            default.clear();
        }
        if let Some(slot) = field.config.default_values_mut() {
            let remaining = slot
                .take()
                .map(|values| {
                    values
                        .into_iter()
                        .filter(|value| *value != removed.value)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            *slot = (!remaining.is_empty()).then_some(remaining);
        }
        Ok(())
    })
}

fn choice_options(field: &mut Field) -> Result<&mut Vec<ChoiceOption>, MutationError> {
    let id = field.id.clone();
    let kind = field.kind();
    field
        .config
        .options_mut()
        .ok_or(MutationError::NotAChoiceField { id, kind })
}

fn edit_field<F>(doc: &FormDocument, id: &FieldId, edit: F) -> Result<FormDocument, MutationError>
where
    F: FnOnce(&mut Field) -> Result<(), MutationError>,
{
    let mut fields = doc.fields().to_vec();
    let field = fields
        .iter_mut()
        .find(|field| &field.id == id)
        .ok_or_else(|| MutationError::FieldNotFound(id.clone()))?;
    edit(field)?;
    Ok(FormDocument::from_unique_fields(fields))
}
