//! All error types for the moneo-l10n crate.
//!
//! These are returned from all fallible operations (reading locale stores,
//! patching the card source, export/import orchestration).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid locale JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("patch pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown context `{0}`")]
    UnknownContext(String),

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
}

impl Error {
    /// Creates a parse error attached to the file it came from.
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Parse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::parse_error("locales/backend/ru.json", json_error);
        assert!(error.to_string().contains("locales/backend/ru.json"));
        assert!(error.to_string().contains("invalid locale JSON"));
    }

    #[test]
    fn test_unknown_context_error() {
        let error = Error::UnknownContext("Sidecar".to_string());
        assert_eq!(error.to_string(), "unknown context `Sidecar`");
    }

    #[test]
    fn test_unknown_language_error() {
        let error = Error::UnknownLanguage("xx".to_string());
        assert_eq!(error.to_string(), "unknown language `xx`");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownContext("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownContext"));
        assert!(debug.contains("test"));
    }
}
