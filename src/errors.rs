//! Error type shared by the manifest parser, the package assembler and the
//! registration shim.
//!
//! Every failure is fail-fast: the CLI reports the message and terminates the
//! run. Only the shim's teardown swallows errors (see [`crate::shim`]).

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

pub type Result<T> = std::result::Result<T, BadkitError>;

#[derive(Debug, Error)]
pub enum BadkitError {
    /// A manifest or a source unit the manifest refers to does not exist.
    #[error("{what} not found at {}", path.display())]
    NotFound { what: String, path: PathBuf },

    /// A source unit exists but does not satisfy its capability contract.
    #[error("failed to locate a conforming {contract} in {module} at {}: {reason}", path.display())]
    Conformance {
        contract: String,
        module: String,
        path: PathBuf,
        reason: String,
    },

    /// The manifest asks for something its units cannot provide.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A tagged manifest node lacks a field its constructor requires.
    #[error("!{tag} is missing required field '{field}'")]
    Construction { tag: String, field: String },

    /// The manifest is not valid YAML or a node has the wrong shape.
    #[error("invalid manifest: {0}")]
    Manifest(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serde(String),

    /// Raised by a [`crate::shim::Host`] implementation.
    #[error("host error: {0}")]
    Host(String),

    /// An external program (host executable, pip) could not be run or failed.
    #[error("process error: {0}")]
    Process(String),
}

impl From<serde_json::Error> for BadkitError {
    fn from(err: serde_json::Error) -> Self {
        BadkitError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for BadkitError {
    fn from(err: serde_yaml::Error) -> Self {
        BadkitError::Manifest(err.to_string())
    }
}

impl From<ZipError> for BadkitError {
    fn from(err: ZipError) -> Self {
        BadkitError::Archive(err.to_string())
    }
}

impl BadkitError {
    pub fn not_found(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        BadkitError::NotFound {
            what: what.into(),
            path: path.into(),
        }
    }

    pub fn conformance(
        contract: impl Into<String>,
        module: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        BadkitError::Conformance {
            contract: contract.into(),
            module: module.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn construction(tag: impl Into<String>, field: impl Into<String>) -> Self {
        BadkitError::Construction {
            tag: tag.into(),
            field: field.into(),
        }
    }

    pub fn manifest<T: Into<String>>(message: T) -> Self {
        BadkitError::Manifest(message.into())
    }

    pub fn host<T: Into<String>>(message: T) -> Self {
        BadkitError::Host(message.into())
    }
}
