pub mod document;
pub mod field;

pub use document::{DuplicateFieldId, FormDocument};
pub use field::{
    CheckboxGroupProps, ChoiceOption, ChoiceProps, CommonProps, ContentProps, Field, FieldConfig,
    FieldId, FieldType, FileProps, InputKind, LayoutProps, LineProps, NumberProps, RangeProps,
    TextAreaProps, TextInputProps, UnknownFieldType, ValueProps,
};
