use std::path::{Path, PathBuf};

use formsmith_spec::codec::{self, CodecError};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::session::FormState;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("{0}: only .json files can be opened or saved")]
    NotJson(PathBuf),
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error(transparent)]
    Encode(CodecError),
}

/// Read and decode a saved form. Nothing is applied to any session here;
/// callers replace their state only on success.
pub async fn read_form(path: &Path) -> Result<FormState, IoError> {
    ensure_json(path)?;
    let bytes = fs::read(path).await.map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (document, store) = codec::deserialize(&bytes).map_err(|source| IoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), fields = document.len(), "form read");
    Ok(FormState::new(document, store))
}

/// Write `state` into `dir` under its suggested file name and return the
/// path written.
pub async fn write_form(dir: &Path, state: &FormState, fallback: &str) -> Result<PathBuf, IoError> {
    let path = form_path(dir, state, fallback);
    write_form_to(&path, state).await?;
    Ok(path)
}

/// Where [`write_form`] would put `state`.
pub fn form_path(dir: &Path, state: &FormState, fallback: &str) -> PathBuf {
    let name = codec::suggested_file_name_or(&state.store, fallback);
    dir.join(sanitize_file_name(&name))
}

pub async fn write_form_to(path: &Path, state: &FormState) -> Result<(), IoError> {
    ensure_json(path)?;
    let bytes = codec::serialize(&state.document, &state.store).map_err(IoError::Encode)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| IoError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    fs::write(path, bytes).await.map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "form saved");
    Ok(())
}

fn ensure_json(path: &Path) -> Result<(), IoError> {
    if codec::has_json_extension(path) {
        Ok(())
    } else {
        Err(IoError::NotJson(path.to_path_buf()))
    }
}

/// Document names are free text; keep them from escaping the target dir.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_are_replaced() {
        assert_eq!(sanitize_file_name("a/b\\c:d.json"), "a_b_c_d.json");
        assert_eq!(sanitize_file_name("survey.json"), "survey.json");
    }
}
