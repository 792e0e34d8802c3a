use std::collections::BTreeSet;

use crate::spec::field::{Field, FieldId};

/// Ordered collection of fields. Order is the rendering and traversal order.
///
/// Documents are values: every edit goes through [`crate::mutate`] and
/// produces a new document, the previous one is never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDocument {
    fields: Vec<Field>,
}

/// Two fields in one document share an id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate field id '{0}'")]
pub struct DuplicateFieldId(pub FieldId);

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document, rejecting fields that reuse an id.
    pub fn from_fields(fields: Vec<Field>) -> Result<Self, DuplicateFieldId> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(&field.id) {
                return Err(DuplicateFieldId(field.id.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Callers guarantee id uniqueness.
    pub(crate) fn from_unique_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| &field.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.iter().map(|field| &field.id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
