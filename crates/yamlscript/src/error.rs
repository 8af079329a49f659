//! Error type for every failure the binding can report

use std::ffi::NulError;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("libys shared library not found (searched: {})", display_paths(.searched))]
    LibraryNotFound { searched: Vec<PathBuf> },

    #[error("failed to load libys: {0}")]
    Library(#[from] libloading::Error),

    #[error("libys is missing symbol '{name}': {source}")]
    MissingSymbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("failed to create isolate (code {code})")]
    IsolateCreation { code: i32 },

    #[error("failed to attach thread (code {code})")]
    ThreadAttach { code: i32 },

    #[error("YAMLScript runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error("YAMLScript runtime is already initialized")]
    AlreadyInitialized,

    #[error("input contains a NUL byte: {0}")]
    InteriorNul(#[from] NulError),

    #[error("libys returned a null response")]
    NullResponse,

    #[error("libys response is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("malformed JSON response from libys: {0}")]
    Json(#[from] serde_json::Error),

    /// The evaluator reported an error inside the response envelope.
    #[error("{cause}")]
    Evaluation { cause: String, kind: Option<String> },

    #[error("unexpected response from 'libys'")]
    UnexpectedResponse,
}

pub type Result<T> = std::result::Result<T, Error>;

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_error_displays_cause_only() {
        let err = Error::Evaluation {
            cause: "Undefined symbol: foo".to_string(),
            kind: Some("clojure.lang.ExceptionInfo".to_string()),
        };
        assert_eq!(err.to_string(), "Undefined symbol: foo");
    }

    #[test]
    fn test_library_not_found_lists_paths() {
        let err = Error::LibraryNotFound {
            searched: vec![PathBuf::from("/usr/local/lib"), PathBuf::from("/opt/ys")],
        };
        let msg = err.to_string();
        assert!(msg.contains("/usr/local/lib"));
        assert!(msg.contains("/opt/ys"));
    }

    #[test]
    fn test_library_not_found_empty_search() {
        let err = Error::LibraryNotFound { searched: vec![] };
        assert!(err.to_string().ends_with("(searched: nothing)"));
    }

    #[test]
    fn test_unexpected_response_message() {
        assert_eq!(
            Error::UnexpectedResponse.to_string(),
            "unexpected response from 'libys'"
        );
    }

    #[test]
    fn test_attach_error_carries_code() {
        let err = Error::ThreadAttach { code: 7 };
        assert_eq!(err.to_string(), "failed to attach thread (code 7)");
    }
}
