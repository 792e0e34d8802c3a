#![allow(missing_docs)]

pub mod codec;
pub mod mutate;
pub mod palette;
pub mod preview;
pub mod spec;
pub mod store;
pub mod validate;

pub use codec::{
    CodecError, FALLBACK_FILE_NAME, SavedForm, deserialize, document_schema, has_json_extension,
    serialize, suggested_file_name, suggested_file_name_or,
};
pub use mutate::{
    MutationError, add_field, add_field_token, add_field_with_id, add_option, move_field,
    remove_field, remove_option, reorder_field, update_field_config, update_option,
};
pub use palette::{PaletteCategory, PaletteEntry, palette};
pub use preview::{
    Control, PreviewError, RenderedField, RenderedForm, ValueChange, apply_change, render_form,
    render_json_ui, render_text,
};
pub use spec::{
    ChoiceOption, DuplicateFieldId, Field, FieldConfig, FieldId, FieldType, FormDocument,
    InputKind, UnknownFieldType,
};
pub use store::{
    DOCUMENT_NAME_KEY, InputValue, InputValueStore, effective_default, reconcile, set_value,
};
pub use validate::{
    FieldError, SubmissionReport, ValidationWarning, WarningCode, check_submission, lint,
};
