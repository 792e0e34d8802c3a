use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Closed set of field kinds a form can contain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    TextInput,
    Textarea,
    Number,
    Email,
    Phone,
    Date,
    Time,
    Url,
    CheckboxGroup,
    RadioGroup,
    Dropdown,
    Switch,
    Image,
    File,
    Video,
    Audio,
    Heading,
    Paragraph,
    Divider,
    Spacer,
    Container,
    Color,
    Range,
    Datetime,
}

/// Raised when a drag payload or caller names a field type that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

impl FieldType {
    pub const ALL: [FieldType; 24] = [
        FieldType::TextInput,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Date,
        FieldType::Time,
        FieldType::Url,
        FieldType::CheckboxGroup,
        FieldType::RadioGroup,
        FieldType::Dropdown,
        FieldType::Switch,
        FieldType::Image,
        FieldType::File,
        FieldType::Video,
        FieldType::Audio,
        FieldType::Heading,
        FieldType::Paragraph,
        FieldType::Divider,
        FieldType::Spacer,
        FieldType::Container,
        FieldType::Color,
        FieldType::Range,
        FieldType::Datetime,
    ];

    /// Token used on the wire and in drag payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::TextInput => "text-input",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Url => "url",
            FieldType::CheckboxGroup => "checkbox-group",
            FieldType::RadioGroup => "radio-group",
            FieldType::Dropdown => "dropdown",
            FieldType::Switch => "switch",
            FieldType::Image => "image",
            FieldType::File => "file",
            FieldType::Video => "video",
            FieldType::Audio => "audio",
            FieldType::Heading => "heading",
            FieldType::Paragraph => "paragraph",
            FieldType::Divider => "divider",
            FieldType::Spacer => "spacer",
            FieldType::Container => "container",
            FieldType::Color => "color",
            FieldType::Range => "range",
            FieldType::Datetime => "datetime",
        }
    }

    /// Parse a palette token. A blank token is the "nothing selected" state and
    /// yields `Ok(None)`; anything else must name a known type.
    pub fn from_token(token: &str) -> Result<Option<Self>, UnknownFieldType> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// Fields that never read or write respondent values.
    pub fn is_static(self) -> bool {
        matches!(
            self,
            FieldType::Heading
                | FieldType::Paragraph
                | FieldType::Divider
                | FieldType::Spacer
                | FieldType::Container
        )
    }

    pub fn is_choice(self) -> bool {
        matches!(
            self,
            FieldType::CheckboxGroup | FieldType::RadioGroup | FieldType::Dropdown
        )
    }

    /// Upload fields; their stored value is the list of selected file names.
    pub fn is_file_like(self) -> bool {
        matches!(
            self,
            FieldType::File | FieldType::Image | FieldType::Video | FieldType::Audio
        )
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| UnknownFieldType(raw.to_string()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, immutable field identity. Join key for stored values and reordering.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh globally unique id.
    pub fn generate() -> Self {
        Self(format!("field-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FieldId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value flavour of a `text-input` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Email,
    Password,
}

/// One selectable entry of a choice field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Attributes every field carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonProps {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    pub required: bool,
}

/// `text-input`: length constraints and pattern, or numeric bounds when
/// `input_kind` is `number`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TextInputProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub input_kind: InputKind,
    pub placeholder: String,
    pub default_value: String,
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

/// `textarea`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAreaProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub placeholder: String,
    pub default_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Single-line typed text: `email`, `phone`, `url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LineProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub placeholder: String,
    pub default_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// `number`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub placeholder: String,
    pub default_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Scalar pickers with nothing beyond a default: `date`, `time`, `datetime`,
/// `color`, `switch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub default_value: String,
}

/// Single-select choice fields: `radio-group`, `dropdown`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChoiceProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub options: Vec<ChoiceOption>,
    pub default_value: String,
}

/// `checkbox-group`. `default_values` is `None` rather than empty when no
/// option is preselected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxGroupProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub options: Vec<ChoiceOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<Vec<String>>,
}

/// `range` slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RangeProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default_value: String,
}

impl Default for RangeProps {
    fn default() -> Self {
        Self {
            common: CommonProps::default(),
            min: 0.0,
            max: 100.0,
            step: 1.0,
            default_value: "50".into(),
        }
    }
}

/// Upload fields: `file`, `image`, `video`, `audio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FileProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub accept: String,
    pub multiple: bool,
}

/// Static text: `heading`, `paragraph`. `content` is what gets rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub content: String,
}

/// Layout placeholders: `divider`, `spacer`, `container`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutProps {
    #[serde(flatten)]
    pub common: CommonProps,
}

/// Per-type field configuration. The variant is the field's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "props", rename_all = "kebab-case")]
pub enum FieldConfig {
    TextInput(TextInputProps),
    Textarea(TextAreaProps),
    Number(NumberProps),
    Email(LineProps),
    Phone(LineProps),
    Date(ValueProps),
    Time(ValueProps),
    Url(LineProps),
    CheckboxGroup(CheckboxGroupProps),
    RadioGroup(ChoiceProps),
    Dropdown(ChoiceProps),
    Switch(ValueProps),
    Image(FileProps),
    File(FileProps),
    Video(FileProps),
    Audio(FileProps),
    Heading(ContentProps),
    Paragraph(ContentProps),
    Divider(LayoutProps),
    Spacer(LayoutProps),
    Container(LayoutProps),
    Color(ValueProps),
    Range(RangeProps),
    Datetime(ValueProps),
}

impl FieldConfig {
    /// Configuration a freshly added field of `kind` starts with.
    pub fn default_for(kind: FieldType) -> Self {
        let upload = |accept: &str| FileProps {
            accept: accept.into(),
            ..FileProps::default()
        };
        match kind {
            FieldType::TextInput => FieldConfig::TextInput(TextInputProps::default()),
            FieldType::Textarea => FieldConfig::Textarea(TextAreaProps::default()),
            FieldType::Number => FieldConfig::Number(NumberProps::default()),
            FieldType::Email => FieldConfig::Email(LineProps::default()),
            FieldType::Phone => FieldConfig::Phone(LineProps::default()),
            FieldType::Url => FieldConfig::Url(LineProps::default()),
            FieldType::Date => FieldConfig::Date(ValueProps::default()),
            FieldType::Time => FieldConfig::Time(ValueProps::default()),
            FieldType::Datetime => FieldConfig::Datetime(ValueProps::default()),
            FieldType::Color => FieldConfig::Color(ValueProps::default()),
            FieldType::Switch => FieldConfig::Switch(ValueProps::default()),
            FieldType::CheckboxGroup => FieldConfig::CheckboxGroup(CheckboxGroupProps::default()),
            FieldType::RadioGroup => FieldConfig::RadioGroup(ChoiceProps::default()),
            FieldType::Dropdown => FieldConfig::Dropdown(ChoiceProps::default()),
            FieldType::Range => FieldConfig::Range(RangeProps::default()),
            FieldType::File => FieldConfig::File(upload("")),
            FieldType::Image => FieldConfig::Image(upload("image/*")),
            FieldType::Video => FieldConfig::Video(upload("video/*")),
            FieldType::Audio => FieldConfig::Audio(upload("audio/*")),
            FieldType::Heading => FieldConfig::Heading(ContentProps {
                common: CommonProps {
                    display_name: "Section title".into(),
                    ..CommonProps::default()
                },
                content: "Describe this section".into(),
            }),
            FieldType::Paragraph => FieldConfig::Paragraph(ContentProps {
                common: CommonProps::default(),
                content: "Add helpful instructions for the user.".into(),
            }),
            FieldType::Divider => FieldConfig::Divider(LayoutProps::default()),
            FieldType::Spacer => FieldConfig::Spacer(LayoutProps::default()),
            FieldType::Container => FieldConfig::Container(LayoutProps::default()),
        }
    }

    pub fn kind(&self) -> FieldType {
        match self {
            FieldConfig::TextInput(_) => FieldType::TextInput,
            FieldConfig::Textarea(_) => FieldType::Textarea,
            FieldConfig::Number(_) => FieldType::Number,
            FieldConfig::Email(_) => FieldType::Email,
            FieldConfig::Phone(_) => FieldType::Phone,
            FieldConfig::Date(_) => FieldType::Date,
            FieldConfig::Time(_) => FieldType::Time,
            FieldConfig::Url(_) => FieldType::Url,
            FieldConfig::CheckboxGroup(_) => FieldType::CheckboxGroup,
            FieldConfig::RadioGroup(_) => FieldType::RadioGroup,
            FieldConfig::Dropdown(_) => FieldType::Dropdown,
            FieldConfig::Switch(_) => FieldType::Switch,
            FieldConfig::Image(_) => FieldType::Image,
            FieldConfig::File(_) => FieldType::File,
            FieldConfig::Video(_) => FieldType::Video,
            FieldConfig::Audio(_) => FieldType::Audio,
            FieldConfig::Heading(_) => FieldType::Heading,
            FieldConfig::Paragraph(_) => FieldType::Paragraph,
            FieldConfig::Divider(_) => FieldType::Divider,
            FieldConfig::Spacer(_) => FieldType::Spacer,
            FieldConfig::Container(_) => FieldType::Container,
            FieldConfig::Color(_) => FieldType::Color,
            FieldConfig::Range(_) => FieldType::Range,
            FieldConfig::Datetime(_) => FieldType::Datetime,
        }
    }

    pub fn common(&self) -> &CommonProps {
        match self {
            FieldConfig::TextInput(props) => &props.common,
            FieldConfig::Textarea(props) => &props.common,
            FieldConfig::Number(props) => &props.common,
            FieldConfig::Email(props) | FieldConfig::Phone(props) | FieldConfig::Url(props) => {
                &props.common
            }
            FieldConfig::Date(props)
            | FieldConfig::Time(props)
            | FieldConfig::Datetime(props)
            | FieldConfig::Color(props)
            | FieldConfig::Switch(props) => &props.common,
            FieldConfig::CheckboxGroup(props) => &props.common,
            FieldConfig::RadioGroup(props) | FieldConfig::Dropdown(props) => &props.common,
            FieldConfig::Range(props) => &props.common,
            FieldConfig::Image(props)
            | FieldConfig::File(props)
            | FieldConfig::Video(props)
            | FieldConfig::Audio(props) => &props.common,
            FieldConfig::Heading(props) | FieldConfig::Paragraph(props) => &props.common,
            FieldConfig::Divider(props)
            | FieldConfig::Spacer(props)
            | FieldConfig::Container(props) => &props.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonProps {
        match self {
            FieldConfig::TextInput(props) => &mut props.common,
            FieldConfig::Textarea(props) => &mut props.common,
            FieldConfig::Number(props) => &mut props.common,
            FieldConfig::Email(props) | FieldConfig::Phone(props) | FieldConfig::Url(props) => {
                &mut props.common
            }
            FieldConfig::Date(props)
            | FieldConfig::Time(props)
            | FieldConfig::Datetime(props)
            | FieldConfig::Color(props)
            | FieldConfig::Switch(props) => &mut props.common,
            FieldConfig::CheckboxGroup(props) => &mut props.common,
            FieldConfig::RadioGroup(props) | FieldConfig::Dropdown(props) => &mut props.common,
            FieldConfig::Range(props) => &mut props.common,
            FieldConfig::Image(props)
            | FieldConfig::File(props)
            | FieldConfig::Video(props)
            | FieldConfig::Audio(props) => &mut props.common,
            FieldConfig::Heading(props) | FieldConfig::Paragraph(props) => &mut props.common,
            FieldConfig::Divider(props)
            | FieldConfig::Spacer(props)
            | FieldConfig::Container(props) => &mut props.common,
        }
    }

    /// Options of a choice field, `None` for every other type.
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            FieldConfig::CheckboxGroup(props) => Some(&props.options),
            FieldConfig::RadioGroup(props) | FieldConfig::Dropdown(props) => Some(&props.options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>> {
        match self {
            FieldConfig::CheckboxGroup(props) => Some(&mut props.options),
            FieldConfig::RadioGroup(props) | FieldConfig::Dropdown(props) => {
                Some(&mut props.options)
            }
            _ => None,
        }
    }

    /// Scalar `defaultValue`, for the types that carry one.
    pub fn default_value(&self) -> Option<&str> {
        match self {
            FieldConfig::TextInput(props) => Some(&props.default_value),
            FieldConfig::Textarea(props) => Some(&props.default_value),
            FieldConfig::Number(props) => Some(&props.default_value),
            FieldConfig::Email(props) | FieldConfig::Phone(props) | FieldConfig::Url(props) => {
                Some(&props.default_value)
            }
            FieldConfig::Date(props)
            | FieldConfig::Time(props)
            | FieldConfig::Datetime(props)
            | FieldConfig::Color(props)
            | FieldConfig::Switch(props) => Some(&props.default_value),
            FieldConfig::RadioGroup(props) | FieldConfig::Dropdown(props) => {
                Some(&props.default_value)
            }
            FieldConfig::Range(props) => Some(&props.default_value),
            _ => None,
        }
    }

    pub fn default_value_mut(&mut self) -> Option<&mut String> {
        match self {
            FieldConfig::TextInput(props) => Some(&mut props.default_value),
            FieldConfig::Textarea(props) => Some(&mut props.default_value),
            FieldConfig::Number(props) => Some(&mut props.default_value),
            FieldConfig::Email(props) | FieldConfig::Phone(props) | FieldConfig::Url(props) => {
                Some(&mut props.default_value)
            }
            FieldConfig::Date(props)
            | FieldConfig::Time(props)
            | FieldConfig::Datetime(props)
            | FieldConfig::Color(props)
            | FieldConfig::Switch(props) => Some(&mut props.default_value),
            FieldConfig::RadioGroup(props) | FieldConfig::Dropdown(props) => {
                Some(&mut props.default_value)
            }
            FieldConfig::Range(props) => Some(&mut props.default_value),
            _ => None,
        }
    }

    /// Preselected values of a `checkbox-group`.
    pub fn default_values(&self) -> Option<&[String]> {
        match self {
            FieldConfig::CheckboxGroup(props) => props.default_values.as_deref(),
            _ => None,
        }
    }

    pub fn default_values_mut(&mut self) -> Option<&mut Option<Vec<String>>> {
        match self {
            FieldConfig::CheckboxGroup(props) => Some(&mut props.default_values),
            _ => None,
        }
    }
}

/// A single form field. Serialized as `{ "id", "type", "props" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    pub id: FieldId,
    #[serde(flatten)]
    pub config: FieldConfig,
}

impl Field {
    pub fn new(id: FieldId, config: FieldConfig) -> Self {
        Self { id, config }
    }

    pub fn kind(&self) -> FieldType {
        self.config.kind()
    }

    pub fn display_name(&self) -> &str {
        &self.config.common().display_name
    }

    pub fn is_required(&self) -> bool {
        self.config.common().required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tokens_round_trip_through_from_str() {
        for kind in FieldType::ALL {
            assert_eq!(kind.as_str().parse::<FieldType>(), Ok(kind));
            assert_eq!(FieldConfig::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn blank_token_is_a_guarded_noop() {
        assert_eq!(FieldType::from_token("   "), Ok(None));
        assert_eq!(
            FieldType::from_token("radio"),
            Err(UnknownFieldType("radio".into()))
        );
    }

    #[test]
    fn field_serializes_with_type_and_props() {
        let field = Field::new(
            FieldId::from("f1"),
            FieldConfig::default_for(FieldType::TextInput),
        );
        let value = serde_json::to_value(&field).expect("serialize");
        assert_eq!(value["id"], "f1");
        assert_eq!(value["type"], "text-input");
        assert_eq!(value["props"]["inputKind"], "text");
        assert_eq!(value["props"]["displayName"], "");
        assert_eq!(value["props"]["required"], false);
    }

    #[test]
    fn missing_props_fall_back_to_defaults() {
        let field: Field = serde_json::from_value(json!({
            "id": "r1",
            "type": "range",
            "props": { "displayName": "Volume" }
        }))
        .expect("deserialize");
        let FieldConfig::Range(props) = &field.config else {
            panic!("expected range");
        };
        assert_eq!(props.max, 100.0);
        assert_eq!(props.default_value, "50");
        assert_eq!(field.display_name(), "Volume");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(FieldId::generate(), FieldId::generate());
    }
}
