//! Catalogue of addable field types. Presentation only; the engine never
//! consults it.

use serde::Serialize;

use crate::spec::field::FieldType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteCategory {
    Text,
    Choice,
    Picker,
    Media,
    Content,
    Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: &'static str,
    pub description: &'static str,
    pub category: PaletteCategory,
}

const fn entry(
    kind: FieldType,
    label: &'static str,
    description: &'static str,
    category: PaletteCategory,
) -> PaletteEntry {
    PaletteEntry {
        kind,
        label,
        description,
        category,
    }
}

static PALETTE: [PaletteEntry; 24] = [
    entry(FieldType::TextInput, "Text Input", "Collect short answers", PaletteCategory::Text),
    entry(
        FieldType::Textarea,
        "Text Area",
        "Collect longer, multi-line answers",
        PaletteCategory::Text,
    ),
    entry(
        FieldType::Number,
        "Number",
        "Numeric answer with optional bounds",
        PaletteCategory::Text,
    ),
    entry(FieldType::Email, "Email", "Email address", PaletteCategory::Text),
    entry(FieldType::Phone, "Phone", "Telephone number", PaletteCategory::Text),
    entry(FieldType::Url, "URL", "Web address", PaletteCategory::Text),
    entry(FieldType::CheckboxGroup, "Checkboxes", "Allow multi-select", PaletteCategory::Choice),
    entry(
        FieldType::RadioGroup,
        "Radio Buttons",
        "Pick exactly one option",
        PaletteCategory::Choice,
    ),
    entry(FieldType::Dropdown, "Dropdown", "Offer predefined choices", PaletteCategory::Choice),
    entry(FieldType::Switch, "Switch", "On/off toggle", PaletteCategory::Choice),
    entry(FieldType::Date, "Date", "Calendar date", PaletteCategory::Picker),
    entry(FieldType::Time, "Time", "Time of day", PaletteCategory::Picker),
    entry(FieldType::Datetime, "Date & Time", "Date with time of day", PaletteCategory::Picker),
    entry(FieldType::Color, "Color Picker", "Pick a color", PaletteCategory::Picker),
    entry(FieldType::Range, "Slider", "Number on a bounded scale", PaletteCategory::Picker),
    entry(FieldType::File, "File Upload", "Attach any file", PaletteCategory::Media),
    entry(FieldType::Image, "Image Upload", "Attach an image", PaletteCategory::Media),
    entry(FieldType::Video, "Video Upload", "Attach a video", PaletteCategory::Media),
    entry(FieldType::Audio, "Audio Upload", "Attach an audio clip", PaletteCategory::Media),
    entry(FieldType::Heading, "Heading", "Section title", PaletteCategory::Content),
    entry(
        FieldType::Paragraph,
        "Paragraph",
        "Instructions or explanatory text",
        PaletteCategory::Content,
    ),
    entry(
        FieldType::Divider,
        "Divider",
        "Horizontal rule between sections",
        PaletteCategory::Layout,
    ),
    entry(FieldType::Spacer, "Spacer", "Vertical whitespace", PaletteCategory::Layout),
    entry(FieldType::Container, "Container", "Grouping placeholder", PaletteCategory::Layout),
];

pub fn palette() -> &'static [PaletteEntry] {
    &PALETTE
}

pub fn lookup(kind: FieldType) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|entry| entry.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_type_has_one_entry() {
        for kind in FieldType::ALL {
            let count = palette().iter().filter(|entry| entry.kind == kind).count();
            assert_eq!(count, 1, "{kind}");
        }
        assert_eq!(lookup(FieldType::Range).map(|entry| entry.label), Some("Slider"));
    }
}
