use formsmith_spec::mutate::{add_field_with_id, update_field_config};
use formsmith_spec::preview::{
    Control, HtmlInputType, PreviewError, RenderedForm, SELECT_PLACEHOLDER, TextLevel,
    ValueChange, apply_change, render_form, render_json_ui, render_text,
};
use formsmith_spec::spec::{
    ChoiceOption, ChoiceProps, FieldConfig, FieldId, FieldType, FormDocument, InputKind,
    RangeProps, TextAreaProps, TextInputProps, ValueProps,
};
use formsmith_spec::store::{InputValue, InputValueStore};
use formsmith_spec::{DOCUMENT_NAME_KEY, deserialize};

fn fixture(name: &str) -> &'static str {
    match name {
        "contact_form" => include_str!("../tests/fixtures/contact_form.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn contact_form() -> (FormDocument, InputValueStore) {
    deserialize(fixture("contact_form").as_bytes()).expect("fixture loads")
}

fn control<'a>(form: &'a RenderedForm, id: &str) -> &'a Control {
    &form.field(&FieldId::from(id)).expect("field rendered").control
}

fn single(kind: FieldType, config: FieldConfig) -> FormDocument {
    let doc = add_field_with_id(&FormDocument::new(), "f".into(), kind).expect("add");
    update_field_config(&doc, &"f".into(), config).expect("configure")
}

#[test]
fn renders_fields_in_document_order() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    assert_eq!(form.document_name, "contact");
    let ids = form
        .fields
        .iter()
        .map(|field| field.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec!["intro", "name", "age", "email", "plan", "topics", "country", "volume", "avatar"]
    );
}

#[test]
fn number_input_uses_bounds_and_drops_lengths() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    let Control::Input(age) = control(&form, "age") else {
        panic!("age renders as input");
    };
    assert_eq!(age.input_type, HtmlInputType::Number);
    assert_eq!(age.constraints.min, Some(0.0));
    assert_eq!(age.constraints.max, Some(120.0));
    assert_eq!(age.constraints.step, Some(1.0));
    assert_eq!(age.constraints.min_length, None);
    assert_eq!(age.constraints.pattern, None);
}

#[test]
fn text_input_uses_lengths_and_drops_bounds() {
    let props = TextInputProps {
        input_kind: InputKind::Password,
        min_length: Some(8),
        pattern: Some("[a-z]+".into()),
        min: Some(1.0),
        ..TextInputProps::default()
    };
    let doc = single(FieldType::TextInput, FieldConfig::TextInput(props));
    let form = render_form(&doc, &InputValueStore::new());
    let Control::Input(input) = control(&form, "f") else {
        panic!("input");
    };
    assert_eq!(input.input_type, HtmlInputType::Password);
    assert_eq!(input.constraints.min_length, Some(8));
    assert_eq!(input.constraints.pattern.as_deref(), Some("[a-z]+"));
    assert_eq!(input.constraints.min, None);
}

#[test]
fn textarea_gets_lengths_only() {
    let props = TextAreaProps {
        min_length: Some(1),
        max_length: Some(500),
        ..TextAreaProps::default()
    };
    let doc = single(FieldType::Textarea, FieldConfig::Textarea(props));
    let form = render_form(&doc, &InputValueStore::new());
    let Control::TextArea(area) = control(&form, "f") else {
        panic!("textarea");
    };
    assert_eq!(area.constraints.max_length, Some(500));
    assert_eq!(area.constraints.pattern, None);
    assert_eq!(area.constraints.step, None);
}

#[test]
fn required_checkbox_group_flags_only_the_first_box() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    let Control::Checkbox(group) = control(&form, "topics") else {
        panic!("checkbox group");
    };
    let flags = group
        .options
        .iter()
        .map(|option| option.required)
        .collect::<Vec<_>>();
    assert_eq!(flags, vec![true, false, false]);

    let store = apply_change(
        &doc,
        &store,
        ValueChange::Toggle {
            id: "topics".into(),
            option: "sales".into(),
            checked: true,
        },
    )
    .expect("toggle");
    let form = render_form(&doc, &store);
    let Control::Checkbox(group) = control(&form, "topics") else {
        panic!("checkbox group");
    };
    assert!(group.options.iter().all(|option| !option.required));
    assert!(group.options[2].checked);
}

#[test]
fn required_radio_group_flags_first_option_until_selected() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    let Control::Radio(group) = control(&form, "plan") else {
        panic!("radio group");
    };
    assert!(group.options[0].checked);
    assert!(group.options.iter().all(|option| !option.required));

    let empty = render_form(&doc, &InputValueStore::new().set_value("plan", ""));
    let Control::Radio(group) = control(&empty, "plan") else {
        panic!("radio group");
    };
    assert!(group.options[0].required);
    assert!(!group.options[1].required);
}

#[test]
fn zero_option_groups_render_inert() {
    let doc = add_field_with_id(&FormDocument::new(), "r".into(), FieldType::RadioGroup)
        .expect("add radio");
    let doc = add_field_with_id(&doc, "c".into(), FieldType::CheckboxGroup).expect("add checks");
    let form = render_form(&doc, &InputValueStore::new());
    for id in ["r", "c"] {
        match control(&form, id) {
            Control::Radio(group) | Control::Checkbox(group) => {
                assert!(!group.interactive);
                assert!(group.options.is_empty());
            }
            other => panic!("unexpected control {:?}", other),
        }
    }
}

#[test]
fn dropdown_leads_with_an_empty_placeholder() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    let Control::Select(select) = control(&form, "country") else {
        panic!("select");
    };
    assert_eq!(select.placeholder, SELECT_PLACEHOLDER);
    assert_eq!(select.value, "");
    assert_eq!(select.options.len(), 2);
    assert!(select.options.iter().all(|option| !option.checked));
}

#[test]
fn range_falls_back_to_min_and_keeps_readout_in_sync() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    let Control::Range(range) = control(&form, "volume") else {
        panic!("range");
    };
    assert_eq!(range.value, "0");
    assert_eq!(range.readout, range.value);

    let store = apply_change(
        &doc,
        &store,
        ValueChange::Text {
            id: "volume".into(),
            value: "7".into(),
        },
    )
    .expect("slide");
    let form = render_form(&doc, &store);
    let Control::Range(range) = control(&form, "volume") else {
        panic!("range");
    };
    assert_eq!((range.value.as_str(), range.readout.as_str()), ("7", "7"));
}

#[test]
fn range_prefers_its_default_over_min() {
    let props = RangeProps {
        min: 10.0,
        default_value: "30".into(),
        ..RangeProps::default()
    };
    let doc = single(FieldType::Range, FieldConfig::Range(props));
    let form = render_form(&doc, &InputValueStore::new());
    let Control::Range(range) = control(&form, "f") else {
        panic!("range");
    };
    assert_eq!(range.value, "30");
}

#[test]
fn scalar_values_follow_store_then_default_then_empty() {
    let props = ValueProps {
        default_value: "#ff0000".into(),
        ..ValueProps::default()
    };
    let doc = single(FieldType::Color, FieldConfig::Color(props));
    let value = |store: &InputValueStore| match control(&render_form(&doc, store), "f") {
        Control::Input(input) => input.value.clone(),
        other => panic!("unexpected control {:?}", other),
    };
    assert_eq!(value(&InputValueStore::new()), "#ff0000");
    assert_eq!(value(&InputValueStore::new().set_value("f", "#00ff00")), "#00ff00");

    let bare = single(FieldType::Time, FieldConfig::default_for(FieldType::Time));
    let form = render_form(&bare, &InputValueStore::new());
    let Control::Input(input) = control(&form, "f") else {
        panic!("input");
    };
    assert_eq!(input.input_type, HtmlInputType::Time);
    assert_eq!(input.value, "");
}

#[test]
fn file_fields_store_names_only() {
    let (doc, store) = contact_form();
    let store = apply_change(
        &doc,
        &store,
        ValueChange::Files {
            id: "avatar".into(),
            names: vec!["me.png".into(), "other.png".into()],
        },
    )
    .expect("pick files");
    assert_eq!(store.get("avatar"), Some(&InputValue::List(vec!["me.png".into()])));

    let form = render_form(&doc, &store);
    let Control::File(file) = control(&form, "avatar") else {
        panic!("file");
    };
    assert_eq!(file.accept.as_deref(), Some("image/*"));
    assert_eq!(file.selected, vec!["me.png".to_string()]);
}

#[test]
fn static_fields_render_content_and_refuse_values() {
    let (doc, store) = contact_form();
    let form = render_form(&doc, &store);
    let Control::Text(text) = control(&form, "intro") else {
        panic!("static text");
    };
    assert_eq!(text.level, TextLevel::Heading);
    assert_eq!(text.text, "Get in touch");

    let err = apply_change(
        &doc,
        &store,
        ValueChange::Text {
            id: "intro".into(),
            value: "x".into(),
        },
    )
    .expect_err("static");
    assert_eq!(err, PreviewError::StaticField("intro".into()));
}

#[test]
fn mismatched_changes_are_rejected() {
    let (doc, store) = contact_form();
    let err = apply_change(
        &doc,
        &store,
        ValueChange::Toggle {
            id: "name".into(),
            option: "x".into(),
            checked: true,
        },
    )
    .expect_err("toggle on text input");
    assert!(matches!(err, PreviewError::UnsupportedChange { .. }));

    let err = apply_change(
        &doc,
        &store,
        ValueChange::Switch {
            id: "missing".into(),
            on: true,
        },
    )
    .expect_err("unknown field");
    assert_eq!(err, PreviewError::FieldNotFound("missing".into()));
}

#[test]
fn switch_and_name_changes_land_in_the_store() {
    let doc = single(FieldType::Switch, FieldConfig::default_for(FieldType::Switch));
    let store = apply_change(
        &doc,
        &InputValueStore::new(),
        ValueChange::Switch {
            id: "f".into(),
            on: true,
        },
    )
    .expect("switch");
    assert_eq!(store.get("f"), Some(&InputValue::from("true")));
    let form = render_form(&doc, &store);
    assert!(matches!(control(&form, "f"), Control::Switch(switch) if switch.checked));

    let store = apply_change(&doc, &store, ValueChange::DocumentName("Signup".into()))
        .expect("rename");
    assert_eq!(store.get(DOCUMENT_NAME_KEY), Some(&InputValue::from("Signup")));
}

#[test]
fn dropdown_selection_marks_the_option() {
    let props = ChoiceProps {
        options: vec![ChoiceOption::new("One", "1"), ChoiceOption::new("Two", "2")],
        default_value: "2".into(),
        ..ChoiceProps::default()
    };
    let doc = single(FieldType::Dropdown, FieldConfig::Dropdown(props));
    let form = render_form(&doc, &InputValueStore::new());
    let Control::Select(select) = control(&form, "f") else {
        panic!("select");
    };
    assert_eq!(select.value, "2");
    assert!(select.options[1].checked);
}

#[test]
fn render_text_summarises_the_preview() {
    let (doc, store) = contact_form();
    let text = render_text(&render_form(&doc, &store));
    assert!(text.starts_with("Form: contact"));
    assert!(text.contains("[text-input] Full name * (name)"));
    assert!(text.contains("help: As printed on your ID"));
    assert!(text.contains("# Get in touch"));
    assert!(text.contains(SELECT_PLACEHOLDER));

    let empty = render_text(&render_form(&FormDocument::new(), &InputValueStore::new()));
    assert!(empty.contains("Add elements to see the preview..."));
}

#[test]
fn render_json_ui_exposes_controls() {
    let (doc, store) = contact_form();
    let ui = render_json_ui(&render_form(&doc, &store)).expect("json ui");
    assert_eq!(ui["document_name"], "contact");
    assert_eq!(ui["empty"], false);
    let fields = ui["fields"].as_array().expect("fields array");
    assert_eq!(fields[1]["type"], "text-input");
    assert_eq!(fields[1]["control"]["control"], "input");
    assert_eq!(fields[2]["control"]["constraints"]["max"], 120.0);
    assert!(fields[2]["control"]["constraints"].get("min_length").is_none());
}
