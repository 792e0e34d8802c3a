use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;

use crate::preview::{Control, HtmlInputType, NativeConstraints, RenderedField, render_form};
use crate::spec::document::FormDocument;
use crate::spec::field::{ChoiceOption, Field, FieldConfig, FieldId, InputKind};
use crate::store::InputValueStore;

/// Authoring problems the editor tolerates but may point out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    EmptyOptionValue,
    DuplicateOptionValue,
    DanglingDefault,
    RangeDefaultOutOfBounds,
    InvalidRangeBounds,
    InvalidPattern,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::EmptyOptionValue => "empty_option_value",
            WarningCode::DuplicateOptionValue => "duplicate_option_value",
            WarningCode::DanglingDefault => "dangling_default",
            WarningCode::RangeDefaultOutOfBounds => "range_default_out_of_bounds",
            WarningCode::InvalidRangeBounds => "invalid_range_bounds",
            WarningCode::InvalidPattern => "invalid_pattern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub field_id: FieldId,
    pub code: WarningCode,
    pub message: String,
}

/// Informational pass over the document. Never blocks anything.
pub fn lint(doc: &FormDocument) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for field in doc.fields() {
        if let Some(options) = field.config.options() {
            lint_options(field, options, &mut warnings);
        }
        match &field.config {
            FieldConfig::Range(props) => {
                let ordered = props.min < props.max;
                if !ordered {
                    warnings.push(warning(
                        field,
                        WarningCode::InvalidRangeBounds,
                        format!("min {} is not below max {}", props.min, props.max),
                    ));
                }
                let default = props.default_value.trim();
                if !default.is_empty() {
                    match default.parse::<f64>() {
                        Ok(value) if value >= props.min && value <= props.max => {}
                        Ok(value) => warnings.push(warning(
                            field,
                            WarningCode::RangeDefaultOutOfBounds,
                            format!(
                                "default {} lies outside [{}, {}]",
                                value, props.min, props.max
                            ),
                        )),
                        Err(_) => warnings.push(warning(
                            field,
                            WarningCode::RangeDefaultOutOfBounds,
                            format!("default '{}' is not a number", default),
                        )),
                    }
                }
            }
            FieldConfig::TextInput(props) if props.input_kind != InputKind::Number => {
                lint_pattern(field, props.pattern.as_deref(), &mut warnings);
            }
            FieldConfig::Email(props) | FieldConfig::Phone(props) | FieldConfig::Url(props) => {
                lint_pattern(field, props.pattern.as_deref(), &mut warnings);
            }
            _ => {}
        }
    }
    warnings
}

fn lint_options(field: &Field, options: &[ChoiceOption], warnings: &mut Vec<ValidationWarning>) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for (index, option) in options.iter().enumerate() {
        if option.value.is_empty() {
            warnings.push(warning(
                field,
                WarningCode::EmptyOptionValue,
                format!("option {} has an empty value", index),
            ));
            continue;
        }
        if !seen.insert(option.value.as_str()) && reported.insert(option.value.as_str()) {
            warnings.push(warning(
                field,
                WarningCode::DuplicateOptionValue,
                format!("value '{}' is used by more than one option", option.value),
            ));
        }
    }

    let known = |value: &str| options.iter().any(|option| option.value == value);
    let defaults = field
        .config
        .default_value()
        .filter(|value| !value.is_empty())
        .into_iter()
        .chain(field.config.default_values().unwrap_or_default().iter().map(String::as_str));
    for default in defaults {
        if !known(default) {
            warnings.push(warning(
                field,
                WarningCode::DanglingDefault,
                format!("default '{}' matches no option", default),
            ));
        }
    }
}

fn lint_pattern(field: &Field, pattern: Option<&str>, warnings: &mut Vec<ValidationWarning>) {
    if let Some(pattern) = pattern.filter(|pattern| !pattern.is_empty())
        && let Err(err) = Regex::new(pattern)
    {
        warnings.push(warning(
            field,
            WarningCode::InvalidPattern,
            format!("pattern does not compile: {}", err),
        ));
    }
}

fn warning(field: &Field, code: WarningCode, message: String) -> ValidationWarning {
    ValidationWarning {
        field_id: field.id.clone(),
        code,
        message,
    }
}

/// Violation of one native constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field_id: FieldId,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReport {
    pub valid: bool,
    pub missing_required: Vec<FieldId>,
    pub errors: Vec<FieldError>,
}

/// Check the current values the way a browser would on submit: only the
/// constraints the preview puts on each control count.
pub fn check_submission(doc: &FormDocument, store: &InputValueStore) -> SubmissionReport {
    let form = render_form(doc, store);
    let mut missing_required = Vec::new();
    let mut errors = Vec::new();

    for field in &form.fields {
        match &field.control {
            Control::Input(input) => check_text(
                field,
                &input.value,
                &input.constraints,
                input.input_type == HtmlInputType::Number,
                &mut missing_required,
                &mut errors,
            ),
            Control::TextArea(area) => check_text(
                field,
                &area.value,
                &area.constraints,
                false,
                &mut missing_required,
                &mut errors,
            ),
            Control::Select(select) => {
                let selected = select.options.iter().any(|option| option.checked);
                if select.required && select.interactive && !selected {
                    missing_required.push(field.id.clone());
                }
            }
            Control::Radio(group) | Control::Checkbox(group) => {
                let required = group.options.iter().any(|option| option.required);
                if required && !group.any_checked() {
                    missing_required.push(field.id.clone());
                }
            }
            Control::Switch(switch) => {
                if switch.required && !switch.checked {
                    missing_required.push(field.id.clone());
                }
            }
            Control::File(file) => {
                if file.required && file.selected.is_empty() {
                    missing_required.push(field.id.clone());
                }
            }
            Control::Range(_)
            | Control::Text(_)
            | Control::Divider
            | Control::Spacer
            | Control::Container => {}
        }
    }

    SubmissionReport {
        valid: missing_required.is_empty() && errors.is_empty(),
        missing_required,
        errors,
    }
}

fn check_text(
    field: &RenderedField,
    value: &str,
    constraints: &NativeConstraints,
    numeric: bool,
    missing_required: &mut Vec<FieldId>,
    errors: &mut Vec<FieldError>,
) {
    if value.is_empty() {
        if constraints.required {
            missing_required.push(field.id.clone());
        }
        return;
    }

    let length = value.chars().count();
    if let Some(min_length) = constraints.min_length
        && length < min_length as usize
    {
        errors.push(field_error(
            field,
            "min_length",
            format!("expected at least {} characters, got {}", min_length, length),
        ));
    }
    if let Some(max_length) = constraints.max_length
        && length > max_length as usize
    {
        errors.push(field_error(
            field,
            "max_length",
            format!("expected at most {} characters, got {}", max_length, length),
        ));
    }
    // The HTML pattern attribute must match the whole value.
    if let Some(pattern) = &constraints.pattern
        && let Ok(regex) = Regex::new(&format!("^(?:{})$", pattern))
        && !regex.is_match(value)
    {
        errors.push(field_error(
            field,
            "pattern_mismatch",
            format!("value does not match pattern '{}'", pattern),
        ));
    }

    if !numeric {
        return;
    }
    let Ok(number) = value.trim().parse::<f64>() else {
        errors.push(field_error(field, "not_a_number", "value is not a number".into()));
        return;
    };
    if let Some(min) = constraints.min
        && number < min
    {
        errors.push(field_error(
            field,
            "range_underflow",
            format!("value {} is below min {}", number, min),
        ));
    }
    if let Some(max) = constraints.max
        && number > max
    {
        errors.push(field_error(
            field,
            "range_overflow",
            format!("value {} is above max {}", number, max),
        ));
    }
}

fn field_error(field: &RenderedField, code: &str, message: String) -> FieldError {
    FieldError {
        field_id: field.id.clone(),
        code: code.into(),
        message,
    }
}
