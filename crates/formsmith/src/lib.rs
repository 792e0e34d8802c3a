#![allow(missing_docs)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod io;
pub mod logging;
pub mod session;

pub use config::{ConfigError, Frontend, StudioConfig, default_config_path, load_config};
pub use io::{IoError, form_path, read_form, write_form, write_form_to};
pub use session::{Command, FormSession, FormState, SessionError};
