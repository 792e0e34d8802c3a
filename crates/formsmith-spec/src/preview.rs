//! Live preview: derives the concrete control for every field, the native
//! constraints it carries and the value it displays, and routes respondent
//! edits back into the value store.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::spec::document::FormDocument;
use crate::spec::field::{
    ChoiceOption, Field, FieldConfig, FieldId, FieldType, FileProps, InputKind,
};
use crate::store::{DOCUMENT_NAME_KEY, InputValue, InputValueStore};

/// Label of the empty leading entry every dropdown shows.
pub const SELECT_PLACEHOLDER: &str = "Select an Option";

/// Native `<input type=...>` flavours the preview uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlInputType {
    Text,
    Number,
    Email,
    Password,
    Tel,
    Url,
    Date,
    Time,
    DatetimeLocal,
    Color,
}

impl HtmlInputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlInputType::Text => "text",
            HtmlInputType::Number => "number",
            HtmlInputType::Email => "email",
            HtmlInputType::Password => "password",
            HtmlInputType::Tel => "tel",
            HtmlInputType::Url => "url",
            HtmlInputType::Date => "date",
            HtmlInputType::Time => "time",
            HtmlInputType::DatetimeLocal => "datetime-local",
            HtmlInputType::Color => "color",
        }
    }
}

impl From<InputKind> for HtmlInputType {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Text => HtmlInputType::Text,
            InputKind::Number => HtmlInputType::Number,
            InputKind::Email => HtmlInputType::Email,
            InputKind::Password => HtmlInputType::Password,
        }
    }
}

/// Native validation attributes applied to a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NativeConstraints {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl NativeConstraints {
    fn required(required: bool) -> Self {
        Self {
            required,
            ..Self::default()
        }
    }

    fn with_lengths(mut self, min_length: Option<u32>, max_length: Option<u32>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    fn with_pattern(mut self, pattern: Option<&String>) -> Self {
        self.pattern = pattern.filter(|pattern| !pattern.is_empty()).cloned();
        self
    }

    fn with_bounds(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputControl {
    pub input_type: HtmlInputType,
    pub placeholder: String,
    pub value: String,
    pub constraints: NativeConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAreaControl {
    pub placeholder: String,
    pub value: String,
    pub constraints: NativeConstraints,
}

/// One rendered option. `required` is the native flag on this one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedOption {
    pub label: String,
    pub value: String,
    pub checked: bool,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectControl {
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    pub interactive: bool,
    pub options: Vec<RenderedOption>,
}

/// Radio or checkbox group. With no options it renders empty and inert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceGroupControl {
    pub interactive: bool,
    pub options: Vec<RenderedOption>,
}

impl ChoiceGroupControl {
    pub fn any_checked(&self) -> bool {
        self.options.iter().any(|option| option.checked)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchControl {
    pub checked: bool,
    pub required: bool,
}

/// Slider plus its numeric readout; both always show the same value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeControl {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: String,
    pub readout: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    pub multiple: bool,
    pub required: bool,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextLevel {
    Heading,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticText {
    pub level: TextLevel,
    pub text: String,
}

/// Concrete control derived for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    Input(InputControl),
    TextArea(TextAreaControl),
    Select(SelectControl),
    Radio(ChoiceGroupControl),
    Checkbox(ChoiceGroupControl),
    Switch(SwitchControl),
    Range(RangeControl),
    File(FileControl),
    Text(StaticText),
    Divider,
    Spacer,
    Container,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    pub control: Control,
}

/// Preview of a whole document, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedForm {
    pub document_name: String,
    pub fields: Vec<RenderedField>,
}

impl RenderedForm {
    pub fn field(&self, id: &FieldId) -> Option<&RenderedField> {
        self.fields.iter().find(|field| &field.id == id)
    }
}

/// Build the preview for `doc` from the values in `store`.
pub fn render_form(doc: &FormDocument, store: &InputValueStore) -> RenderedForm {
    RenderedForm {
        document_name: store.document_name().unwrap_or_default().to_string(),
        fields: doc
            .fields()
            .iter()
            .map(|field| render_field(field, store))
            .collect(),
    }
}

pub fn render_field(field: &Field, store: &InputValueStore) -> RenderedField {
    let common = field.config.common();
    RenderedField {
        id: field.id.clone(),
        kind: field.kind(),
        label: common.display_name.clone(),
        helper_text: common.helper_text.clone(),
        control: derive_control(field, store),
    }
}

fn derive_control(field: &Field, store: &InputValueStore) -> Control {
    let value = || scalar_value(field, store);
    match &field.config {
        FieldConfig::TextInput(props) => {
            let base = NativeConstraints::required(props.common.required);
            // Numeric bounds and length/pattern constraints never coexist.
            let constraints = if props.input_kind == InputKind::Number {
                base.with_bounds(props.min, props.max, props.step)
            } else {
                base.with_lengths(props.min_length, props.max_length)
                    .with_pattern(props.pattern.as_ref())
            };
            Control::Input(InputControl {
                input_type: props.input_kind.into(),
                placeholder: props.placeholder.clone(),
                value: value(),
                constraints,
            })
        }
        FieldConfig::Textarea(props) => Control::TextArea(TextAreaControl {
            placeholder: props.placeholder.clone(),
            value: value(),
            constraints: NativeConstraints::required(props.common.required)
                .with_lengths(props.min_length, props.max_length),
        }),
        FieldConfig::Email(props) | FieldConfig::Phone(props) | FieldConfig::Url(props) => {
            let input_type = match field.kind() {
                FieldType::Email => HtmlInputType::Email,
                FieldType::Phone => HtmlInputType::Tel,
                _ => HtmlInputType::Url,
            };
            Control::Input(InputControl {
                input_type,
                placeholder: props.placeholder.clone(),
                value: value(),
                constraints: NativeConstraints::required(props.common.required)
                    .with_lengths(props.min_length, props.max_length)
                    .with_pattern(props.pattern.as_ref()),
            })
        }
        FieldConfig::Number(props) => Control::Input(InputControl {
            input_type: HtmlInputType::Number,
            placeholder: props.placeholder.clone(),
            value: value(),
            constraints: NativeConstraints::required(props.common.required)
                .with_bounds(props.min, props.max, props.step),
        }),
        FieldConfig::Date(props)
        | FieldConfig::Time(props)
        | FieldConfig::Datetime(props)
        | FieldConfig::Color(props) => {
            let input_type = match field.kind() {
                FieldType::Date => HtmlInputType::Date,
                FieldType::Time => HtmlInputType::Time,
                FieldType::Datetime => HtmlInputType::DatetimeLocal,
                _ => HtmlInputType::Color,
            };
            Control::Input(InputControl {
                input_type,
                placeholder: String::new(),
                value: value(),
                constraints: NativeConstraints::required(props.common.required),
            })
        }
        FieldConfig::Switch(props) => Control::Switch(SwitchControl {
            checked: value() == "true",
            required: props.common.required,
        }),
        FieldConfig::Dropdown(props) => {
            let current = value();
            Control::Select(SelectControl {
                placeholder: SELECT_PLACEHOLDER.into(),
                required: props.common.required,
                interactive: !props.options.is_empty(),
                options: props
                    .options
                    .iter()
                    .map(|option| plain_option(option, option.value == current))
                    .collect(),
                value: current,
            })
        }
        FieldConfig::RadioGroup(props) => {
            let current = value();
            Control::Radio(choice_group(
                &props.options,
                |option| option.value == current,
                props.common.required,
            ))
        }
        FieldConfig::CheckboxGroup(props) => {
            let selection = store
                .get(field.id.as_str())
                .map(InputValue::to_selection)
                .or_else(|| props.default_values.clone())
                .unwrap_or_default();
            Control::Checkbox(choice_group(
                &props.options,
                |option| selection.contains(&option.value),
                props.common.required,
            ))
        }
        FieldConfig::Range(props) => {
            let shown = match store.get(field.id.as_str()) {
                Some(stored) => stored.to_display(),
                None if !props.default_value.is_empty() => props.default_value.clone(),
                None => props.min.to_string(),
            };
            Control::Range(RangeControl {
                min: props.min,
                max: props.max,
                step: props.step,
                readout: shown.clone(),
                value: shown,
                required: props.common.required,
            })
        }
        FieldConfig::File(props)
        | FieldConfig::Image(props)
        | FieldConfig::Video(props)
        | FieldConfig::Audio(props) => Control::File(file_control(field, props, store)),
        FieldConfig::Heading(props) => Control::Text(StaticText {
            level: TextLevel::Heading,
            text: props.content.clone(),
        }),
        FieldConfig::Paragraph(props) => Control::Text(StaticText {
            level: TextLevel::Paragraph,
            text: props.content.clone(),
        }),
        FieldConfig::Divider(_) => Control::Divider,
        FieldConfig::Spacer(_) => Control::Spacer,
        FieldConfig::Container(_) => Control::Container,
    }
}

/// `store[id] ?? defaultValue ?? ""`.
fn scalar_value(field: &Field, store: &InputValueStore) -> String {
    match store.get(field.id.as_str()) {
        Some(stored) => stored.to_display(),
        None => field.config.default_value().unwrap_or_default().to_string(),
    }
}

fn plain_option(option: &ChoiceOption, checked: bool) -> RenderedOption {
    RenderedOption {
        label: option.label.clone(),
        value: option.value.clone(),
        checked,
        required: false,
    }
}

/// While nothing is checked, a required group puts the native required flag
/// on its first widget only, so the browser's complaint has one anchor.
fn choice_group<F>(options: &[ChoiceOption], is_checked: F, required: bool) -> ChoiceGroupControl
where
    F: Fn(&ChoiceOption) -> bool,
{
    let mut rendered = options
        .iter()
        .map(|option| plain_option(option, is_checked(option)))
        .collect::<Vec<_>>();
    let none_checked = !rendered.iter().any(|option| option.checked);
    if required
        && none_checked
        && let Some(first) = rendered.first_mut()
    {
        first.required = true;
    }
    ChoiceGroupControl {
        interactive: !rendered.is_empty(),
        options: rendered,
    }
}

fn file_control(field: &Field, props: &FileProps, store: &InputValueStore) -> FileControl {
    FileControl {
        accept: Some(props.accept.clone()).filter(|accept| !accept.is_empty()),
        multiple: props.multiple,
        required: props.common.required,
        selected: store
            .get(field.id.as_str())
            .map(InputValue::to_selection)
            .unwrap_or_default(),
    }
}

/// A respondent edit coming from a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueChange {
    /// New text of a scalar control (inputs, textarea, dropdown, radio, range,
    /// pickers).
    Text { id: FieldId, value: String },
    /// One checkbox of a group flipped.
    Toggle {
        id: FieldId,
        option: String,
        checked: bool,
    },
    Switch { id: FieldId, on: bool },
    /// Names of the files picked; contents never reach the store.
    Files { id: FieldId, names: Vec<String> },
    DocumentName(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreviewError {
    #[error("field '{0}' not found")]
    FieldNotFound(FieldId),
    #[error("field '{0}' is static and holds no value")]
    StaticField(FieldId),
    #[error("a {change} change does not apply to {kind} field '{id}'")]
    UnsupportedChange {
        id: FieldId,
        kind: FieldType,
        change: &'static str,
    },
}

impl ValueChange {
    fn label(&self) -> &'static str {
        match self {
            ValueChange::Text { .. } => "text",
            ValueChange::Toggle { .. } => "toggle",
            ValueChange::Switch { .. } => "switch",
            ValueChange::Files { .. } => "files",
            ValueChange::DocumentName(_) => "document-name",
        }
    }
}

/// Route an edit into the store with `set_value`. No reconciliation happens
/// here; that only follows document-shape changes.
pub fn apply_change(
    doc: &FormDocument,
    store: &InputValueStore,
    change: ValueChange,
) -> Result<InputValueStore, PreviewError> {
    let id = match &change {
        ValueChange::DocumentName(name) => {
            return Ok(store.set_value(DOCUMENT_NAME_KEY, name.as_str()));
        }
        ValueChange::Text { id, .. }
        | ValueChange::Toggle { id, .. }
        | ValueChange::Switch { id, .. }
        | ValueChange::Files { id, .. } => id,
    };
    let field = doc
        .field(id)
        .ok_or_else(|| PreviewError::FieldNotFound(id.clone()))?;
    let kind = field.kind();
    if kind.is_static() {
        return Err(PreviewError::StaticField(id.clone()));
    }
    let unsupported = |change: &ValueChange| PreviewError::UnsupportedChange {
        id: field.id.clone(),
        kind,
        change: change.label(),
    };

    match (&field.config, &change) {
        (FieldConfig::CheckboxGroup(props), ValueChange::Toggle { option, checked, .. }) => {
            let mut selection = store
                .get(id.as_str())
                .map(InputValue::to_selection)
                .or_else(|| props.default_values.clone())
                .unwrap_or_default();
            if *checked {
                if !selection.contains(option) {
                    selection.push(option.clone());
                }
            } else {
                selection.retain(|value| value != option);
            }
            Ok(store.set_value(id.as_str(), selection))
        }
        (FieldConfig::Switch(_), ValueChange::Switch { on, .. }) => {
            Ok(store.set_value(id.as_str(), on.to_string()))
        }
        (
            FieldConfig::File(props)
            | FieldConfig::Image(props)
            | FieldConfig::Video(props)
            | FieldConfig::Audio(props),
            ValueChange::Files { names, .. },
        ) => {
            let mut names = names.clone();
            if !props.multiple {
                names.truncate(1);
            }
            Ok(store.set_value(id.as_str(), names))
        }
        (config, ValueChange::Text { value, .. })
            if !config.kind().is_file_like() && config.kind() != FieldType::CheckboxGroup =>
        {
            Ok(store.set_value(id.as_str(), value.as_str()))
        }
        _ => Err(unsupported(&change)),
    }
}

/// JSON rendition for machine frontends.
pub fn render_json_ui(form: &RenderedForm) -> Result<Value, serde_json::Error> {
    let mut ui = serde_json::to_value(form)?;
    if let Some(map) = ui.as_object_mut() {
        map.insert("empty".into(), Value::Bool(form.fields.is_empty()));
    }
    Ok(ui)
}

/// Human-friendly rendition of the preview.
pub fn render_text(form: &RenderedForm) -> String {
    let mut lines = Vec::new();
    let name = if form.document_name.is_empty() {
        "(untitled)"
    } else {
        form.document_name.as_str()
    };
    lines.push(format!("Form: {}", name));
    if form.fields.is_empty() {
        lines.push("Add elements to see the preview...".to_string());
        return lines.join("\n");
    }

    for field in &form.fields {
        let mut header = format!(" - [{}] {}", field.kind, display_label(field));
        if is_required(&field.control) {
            header.push_str(" *");
        }
        header.push_str(&format!(" ({})", field.id));
        lines.push(header);
        if let Some(helper) = field.helper_text.as_deref().filter(|text| !text.is_empty()) {
            lines.push(format!("     help: {}", helper));
        }
        lines.extend(control_lines(&field.control));
    }

    lines.join("\n")
}

fn display_label(field: &RenderedField) -> &str {
    if field.label.is_empty() {
        "(no label)"
    } else {
        &field.label
    }
}

fn is_required(control: &Control) -> bool {
    match control {
        Control::Input(input) => input.constraints.required,
        Control::TextArea(area) => area.constraints.required,
        Control::Select(select) => select.required,
        Control::Radio(group) | Control::Checkbox(group) => {
            group.options.iter().any(|option| option.required)
        }
        Control::Switch(switch) => switch.required,
        Control::Range(range) => range.required,
        Control::File(file) => file.required,
        Control::Text(_) | Control::Divider | Control::Spacer | Control::Container => false,
    }
}

fn control_lines(control: &Control) -> Vec<String> {
    match control {
        Control::Input(input) => vec![format!(
            "     <input type={}> = {:?}{}",
            input.input_type.as_str(),
            input.value,
            constraint_suffix(&input.constraints)
        )],
        Control::TextArea(area) => vec![format!(
            "     <textarea> = {:?}{}",
            area.value,
            constraint_suffix(&area.constraints)
        )],
        Control::Select(select) => {
            let mut lines = vec![format!("     <select> = {:?}", select.value)];
            lines.push(format!("       ( ) {}", select.placeholder));
            lines.extend(option_lines(&select.options, "( )", "(x)"));
            lines
        }
        Control::Radio(group) => group_lines(group, "( )", "(x)"),
        Control::Checkbox(group) => group_lines(group, "[ ]", "[x]"),
        Control::Switch(switch) => vec![format!(
            "     <switch> {}",
            if switch.checked { "on" } else { "off" }
        )],
        Control::Range(range) => vec![format!(
            "     <range {}..{} step {}> = {}",
            range.min, range.max, range.step, range.readout
        )],
        Control::File(file) => {
            let accept = file.accept.as_deref().unwrap_or("*");
            let selected = if file.selected.is_empty() {
                "no file chosen".to_string()
            } else {
                file.selected.join(", ")
            };
            vec![format!(
                "     <file accept={}{}> {}",
                accept,
                if file.multiple { " multiple" } else { "" },
                selected
            )]
        }
        Control::Text(text) => match text.level {
            TextLevel::Heading => vec![format!("     # {}", text.text)],
            TextLevel::Paragraph => vec![format!("     {}", text.text)],
        },
        Control::Divider => vec!["     ----".to_string()],
        Control::Spacer => vec![String::new()],
        Control::Container => vec!["     [container]".to_string()],
    }
}

fn group_lines(group: &ChoiceGroupControl, off: &str, on: &str) -> Vec<String> {
    if !group.interactive {
        return vec!["     (no options)".to_string()];
    }
    option_lines(&group.options, off, on)
}

fn option_lines(options: &[RenderedOption], off: &str, on: &str) -> Vec<String> {
    options
        .iter()
        .map(|option| {
            format!(
                "       {} {} [{}]",
                if option.checked { on } else { off },
                option.label,
                option.value
            )
        })
        .collect()
}

fn constraint_suffix(constraints: &NativeConstraints) -> String {
    let mut parts = Vec::new();
    if let Some(min_length) = constraints.min_length {
        parts.push(format!("minlength={}", min_length));
    }
    if let Some(max_length) = constraints.max_length {
        parts.push(format!("maxlength={}", max_length));
    }
    if let Some(pattern) = &constraints.pattern {
        parts.push(format!("pattern={}", pattern));
    }
    if let Some(min) = constraints.min {
        parts.push(format!("min={}", min));
    }
    if let Some(max) = constraints.max {
        parts.push(format!("max={}", max));
    }
    if let Some(step) = constraints.step {
        parts.push(format!("step={}", step));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(" "))
    }
}
