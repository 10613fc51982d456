use crate::variables_model::VariableId;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a `VariablesPort` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("variable {0} does not exist")]
    UnknownVariable(VariableId),

    #[error("environment '{0}' does not exist")]
    UnknownEnvironment(String),

    #[error("store rejected the request: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum VarsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse seed file '{path}': {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid filter pattern: {0}")]
    Filter(#[from] regex::Error),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl VarsError {
    /// Short text for the status line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("I/O error: {e}"),
            Self::Seed { path, .. } => format!("Bad seed file {}", path.display()),
            Self::Filter(_) => "Invalid filter pattern".to_string(),
            Self::Clipboard(msg) => format!("Clipboard: {msg}"),
            Self::Store(e) => e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VarsError>;
