//! JSON snapshot of a document plus its input values:
//! `{ "fields": [...], "inputValues": {...} }`.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::spec::document::FormDocument;
use crate::spec::field::Field;
use crate::store::InputValueStore;

/// File name used when the document has no name.
pub const FALLBACK_FILE_NAME: &str = "form.json";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed json")]
    MalformedJson(#[source] serde_json::Error),
    #[error("invalid format: {detail}")]
    InvalidFormat { detail: String },
    #[error("failed to encode form: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    fn invalid(detail: impl Into<String>) -> Self {
        CodecError::InvalidFormat {
            detail: detail.into(),
        }
    }
}

/// On-disk shape. `inputValues` may be absent or null.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedForm {
    pub fields: Vec<Field>,
    #[serde(default)]
    pub input_values: Option<InputValueStore>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedFormRef<'a> {
    fields: &'a [Field],
    input_values: &'a InputValueStore,
}

/// Pretty-printed JSON bytes of the pair.
pub fn serialize(doc: &FormDocument, store: &InputValueStore) -> Result<Vec<u8>, CodecError> {
    let saved = SavedFormRef {
        fields: doc.fields(),
        input_values: store,
    };
    serde_json::to_vec_pretty(&saved).map_err(CodecError::Encode)
}

/// Parse a snapshot. No migration happens: unknown keys are ignored and
/// missing props fall back to the type defaults.
pub fn deserialize(bytes: &[u8]) -> Result<(FormDocument, InputValueStore), CodecError> {
    let value: Value = serde_json::from_slice(bytes).map_err(CodecError::MalformedJson)?;
    if !value.get("fields").is_some_and(Value::is_array) {
        return Err(CodecError::invalid("missing \"fields\" array"));
    }
    let saved: SavedForm =
        serde_json::from_value(value).map_err(|err| CodecError::invalid(err.to_string()))?;
    let doc = FormDocument::from_fields(saved.fields)
        .map_err(|err| CodecError::invalid(err.to_string()))?;
    Ok((doc, saved.input_values.unwrap_or_default()))
}

/// `<document-name>.json`, or [`FALLBACK_FILE_NAME`].
pub fn suggested_file_name(store: &InputValueStore) -> String {
    suggested_file_name_or(store, FALLBACK_FILE_NAME)
}

pub fn suggested_file_name_or(store: &InputValueStore, fallback: &str) -> String {
    match store.document_name() {
        Some(name) => format!("{}.json", name.trim()),
        None => fallback.to_string(),
    }
}

/// Loader guard: only `.json` files are accepted.
pub fn has_json_extension(name: impl AsRef<Path>) -> bool {
    name.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "json")
}

/// JSON Schema of the snapshot format.
pub fn document_schema() -> Result<Value, CodecError> {
    serde_json::to_value(schemars::schema_for!(SavedForm)).map_err(CodecError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DOCUMENT_NAME_KEY;

    #[test]
    fn file_name_follows_document_name() {
        let store = InputValueStore::new();
        assert_eq!(suggested_file_name(&store), "form.json");
        let store = store.set_value(DOCUMENT_NAME_KEY, "  ");
        assert_eq!(suggested_file_name(&store), "form.json");
        let store = store.set_value(DOCUMENT_NAME_KEY, "survey");
        assert_eq!(suggested_file_name(&store), "survey.json");
    }

    #[test]
    fn json_extension_guard() {
        assert!(has_json_extension("form.json"));
        assert!(has_json_extension("/tmp/dir/a.b.json"));
        assert!(!has_json_extension("form.txt"));
        assert!(!has_json_extension("json"));
    }

    #[test]
    fn schema_lists_fields_and_input_values() {
        let schema = document_schema().expect("schema");
        let properties = &schema["properties"];
        assert!(properties.get("fields").is_some());
        assert!(properties.get("inputValues").is_some());
    }
}
