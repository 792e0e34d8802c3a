use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::document::FormDocument;
use crate::spec::field::Field;

/// Reserved key holding the document name. Survives every reconciliation.
pub const DOCUMENT_NAME_KEY: &str = "document-name";

/// A respondent value: one string, or an ordered list for multi-select and
/// multi-file fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum InputValue {
    Text(String),
    List(Vec<String>),
}

impl InputValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InputValue::Text(text) => Some(text),
            InputValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            InputValue::List(items) => Some(items),
            InputValue::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            InputValue::Text(text) => text.is_empty(),
            InputValue::List(items) => items.is_empty(),
        }
    }

    /// Flattened form used when a scalar control shows the value.
    pub fn to_display(&self) -> String {
        match self {
            InputValue::Text(text) => text.clone(),
            InputValue::List(items) => items.join(", "),
        }
    }

    /// Values as a selection set; a non-empty text counts as one entry.
    pub fn to_selection(&self) -> Vec<String> {
        match self {
            InputValue::Text(text) if text.is_empty() => Vec::new(),
            InputValue::Text(text) => vec![text.clone()],
            InputValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for InputValue {
    fn from(text: &str) -> Self {
        InputValue::Text(text.to_string())
    }
}

impl From<String> for InputValue {
    fn from(text: String) -> Self {
        InputValue::Text(text)
    }
}

impl From<Vec<String>> for InputValue {
    fn from(items: Vec<String>) -> Self {
        InputValue::List(items)
    }
}

/// Respondent values keyed by field id (or [`DOCUMENT_NAME_KEY`]).
///
/// Kept apart from the field definitions so that editing a field's config
/// never wipes what was typed into the preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct InputValueStore {
    values: BTreeMap<String, InputValue>,
}

impl InputValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name stored under [`DOCUMENT_NAME_KEY`], when it is a non-empty text.
    pub fn document_name(&self) -> Option<&str> {
        self.get(DOCUMENT_NAME_KEY)
            .and_then(InputValue::as_text)
            .filter(|name| !name.trim().is_empty())
    }

    /// New store with `key` set to `value`.
    pub fn set_value(&self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        let mut values = self.values.clone();
        values.insert(key.into(), value.into());
        Self { values }
    }

    /// Bring the store in line with `doc`: drop keys of fields that no longer
    /// exist, then seed absent entries from non-empty field defaults.
    pub fn reconcile(&self, doc: &FormDocument) -> Self {
        let mut values: BTreeMap<String, InputValue> = self
            .values
            .iter()
            .filter(|(key, _)| {
                key.as_str() == DOCUMENT_NAME_KEY || doc.ids().any(|id| id.as_str() == key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for field in doc.fields() {
            if values.contains_key(field.id.as_str()) {
                continue;
            }
            if let Some(default) = effective_default(field) {
                values.insert(field.id.to_string(), default);
            }
        }

        Self { values }
    }
}

impl FromIterator<(String, InputValue)> for InputValueStore {
    fn from_iter<I: IntoIterator<Item = (String, InputValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Functional update of one key.
pub fn set_value(
    store: &InputValueStore,
    key: impl Into<String>,
    value: impl Into<InputValue>,
) -> InputValueStore {
    store.set_value(key, value)
}

/// See [`InputValueStore::reconcile`].
pub fn reconcile(store: &InputValueStore, doc: &FormDocument) -> InputValueStore {
    store.reconcile(doc)
}

/// The value a field shows before the respondent touches it, if any:
/// `defaultValue` for scalar types, `defaultValues` for checkbox groups.
pub fn effective_default(field: &Field) -> Option<InputValue> {
    if let Some(defaults) = field.config.default_values() {
        return (!defaults.is_empty()).then(|| InputValue::List(defaults.to_vec()));
    }
    field
        .config
        .default_value()
        .filter(|default| !default.is_empty())
        .map(InputValue::from)
}
