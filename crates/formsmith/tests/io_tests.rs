use formsmith::io::{IoError, read_form, write_form, write_form_to};
use formsmith::session::{Command, FormSession, FormState};
use formsmith_spec::codec::CodecError;
use formsmith_spec::preview::ValueChange;
use formsmith_spec::spec::FieldType;

fn sample_state() -> FormState {
    let mut session = FormSession::new();
    session
        .dispatch(Command::AddField(FieldType::TextInput))
        .expect("add");
    session
        .dispatch(Command::AddField(FieldType::Range))
        .expect("add");
    session
        .dispatch(Command::Change(ValueChange::DocumentName("Feedback".into())))
        .expect("name");
    session.state().clone()
}

#[tokio::test]
async fn write_then_read_returns_the_same_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = sample_state();

    let path = write_form(dir.path(), &state, "form.json")
        .await
        .expect("write");
    assert_eq!(path, dir.path().join("Feedback.json"));

    let loaded = read_form(&path).await.expect("read");
    assert_eq!(loaded, state);
}

#[tokio::test]
async fn unnamed_forms_use_the_fallback_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_form(dir.path(), &FormState::default(), "untitled.json")
        .await
        .expect("write");
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("untitled.json"));
}

#[tokio::test]
async fn nested_directories_are_created() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a/b/form.json");
    write_form_to(&path, &sample_state()).await.expect("write");
    assert!(path.is_file());
}

#[tokio::test]
async fn non_json_paths_are_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("form.txt");
    std::fs::write(&path, "{\"fields\":[]}").expect("seed");

    assert!(matches!(read_form(&path).await, Err(IoError::NotJson(_))));
    assert!(matches!(
        write_form_to(&path, &FormState::default()).await,
        Err(IoError::NotJson(_))
    ));
}

#[tokio::test]
async fn bad_contents_surface_codec_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let malformed = dir.path().join("malformed.json");
    std::fs::write(&malformed, "{not json").expect("seed");
    let err = read_form(&malformed).await.expect_err("malformed");
    assert!(matches!(
        err,
        IoError::Decode {
            source: CodecError::MalformedJson(_),
            ..
        }
    ));

    let missing = dir.path().join("missing.json");
    assert!(matches!(read_form(&missing).await, Err(IoError::Read { .. })));
}

#[tokio::test]
async fn failed_read_keeps_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{\"fields\": 3}").expect("seed");

    let mut session = FormSession::with_state(sample_state());
    let before = session.state().clone();
    if let Ok(state) = read_form(&broken).await {
        session.dispatch(Command::Replace(state)).expect("replace");
    }
    assert_eq!(session.state(), &before);
}
