pub mod catalog;
pub mod edit;
pub mod new;
pub mod preview;

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::io;
use crate::session::FormSession;

/// Open a saved form in a fresh session.
pub(crate) async fn open(path: &Path) -> Result<FormSession> {
    let state = io::read_form(path)
        .await
        .with_context(|| format!("cannot open form {}", path.display()))?;
    Ok(FormSession::with_state(state))
}

pub(crate) async fn save(path: &Path, session: &FormSession) -> Result<()> {
    io::write_form_to(path, session.state())
        .await
        .with_context(|| format!("cannot save form {}", path.display()))
}
