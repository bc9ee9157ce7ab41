//! Error types for extraction and dispatch.
//!
//! Two families: fatal errors abort a run before anything is printed
//! ([`FatalError`]), dispatch errors are rendered together with the help text
//! and never escape [`crate::dispatch::Dispatcher::run`] ([`DispatchError`]).

use std::path::PathBuf;

use thiserror::Error;

use crate::extract::ParamType;

/// The process context or the argument vector cannot be used.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("argument vector is empty (expected at least the program name)")]
    MissingProgramName,

    #[error("argument #{index} is not valid UTF-8")]
    NonUnicodeArgument { index: usize },

    #[error("failed to load config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// The command type's registration is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("exposed method #{index} has an empty name")]
    EmptyMethodName { index: usize },

    #[error("method '{method}' is exposed more than once")]
    DuplicateMethod { method: String },

    #[error("method '{method}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { method: String, parameter: String },

    #[error("method '{method}' has no @param tag for parameter '{parameter}'")]
    UndocumentedParameter { method: String, parameter: String },

    #[error(
        "method '{method}' declares parameter '{parameter}' with unsupported type '{declared}' \
         (expected string, int, bool or list)"
    )]
    UnsupportedType {
        method: String,
        parameter: String,
        declared: String,
    },
}

/// Errors that stop a run before any output is produced.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("metadata defect: {0}")]
    Metadata(#[from] MetadataError),
}

/// Recoverable dispatch failures, rendered as `Error! <message>` plus help.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Missing parameter '-{parameter}' for method {method} ({description})")]
    MissingRequiredParameter {
        method: String,
        parameter: String,
        description: String,
    },

    #[error("Invalid Method specified")]
    UnresolvedMethod { suggestion: Option<String> },

    #[error("Invalid value '{raw}' for parameter '-{parameter}' of method {method} (expected {expected})")]
    InvalidParameterValue {
        method: String,
        parameter: String,
        expected: ParamType,
        raw: String,
    },

    #[error("{0}")]
    MethodFailed(#[source] anyhow::Error),
}

impl DispatchError {
    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::MissingRequiredParameter { .. } => "missing_required_parameter",
            DispatchError::UnresolvedMethod { .. } => "unresolved_method",
            DispatchError::InvalidParameterValue { .. } => "invalid_parameter_value",
            DispatchError::MethodFailed(_) => "method_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message_names_parameter() {
        let err = DispatchError::MissingRequiredParameter {
            method: "power".to_string(),
            parameter: "x".to_string(),
            description: "The base to use".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing parameter '-x' for method power (The base to use)"
        );
        assert_eq!(err.kind(), "missing_required_parameter");
    }

    #[test]
    fn test_unresolved_method_message() {
        let err = DispatchError::UnresolvedMethod { suggestion: None };
        assert_eq!(err.to_string(), "Invalid Method specified");
    }

    #[test]
    fn test_method_failure_shows_inner_message() {
        let err = DispatchError::MethodFailed(anyhow::anyhow!("Parameter -max should be greater than 1"));
        assert_eq!(err.to_string(), "Parameter -max should be greater than 1");
    }

    #[test]
    fn test_fatal_wraps_metadata_defect() {
        let fatal: FatalError = MetadataError::DuplicateMethod {
            method: "power".to_string(),
        }
        .into();
        assert!(fatal.to_string().starts_with("metadata defect:"));
    }
}
