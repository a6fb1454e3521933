//! # Confman Errors
//!
//! Defines [`ConfigError`], the single error type returned by every fallible
//! operation in this crate.
//!
//! Filesystem failures keep the original [`std::io::Error`] as their source
//! along with the operation and path that produced it. Codec failures from
//! the JSON/TOML/CSV/XML backends are passed through transparently, so their
//! messages read exactly as the codec reported them.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,

    #[error("could not determine the platform config directory")]
    ConfigDirUnavailable,

    #[error("Invalid path provided: '{path}': {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("'{0}' does not exist")]
    NotFound(String),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("'{0}' already has a default")]
    DuplicateDefault(String),

    #[error("'{0}' was already closed")]
    AlreadyClosed(String),

    #[error("I/O error while streaming {format}: {source}")]
    Stream {
        format: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported configuration format for '{0}'")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml-config")]
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml-config")]
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[cfg(feature = "csv-config")]
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[cfg(feature = "csv-config")]
    #[error("CSV records do not fit the requested type: {0}")]
    CsvShape(#[from] serde::de::value::Error),

    #[cfg(feature = "xml-config")]
    #[error(transparent)]
    XmlDe(#[from] quick_xml::DeError),

    #[cfg(feature = "xml-config")]
    #[error(transparent)]
    XmlSe(#[from] quick_xml::SeError),
}

// Helper for creating Io errors, ensuring path is always included.
impl ConfigError {
    pub fn io(source: io::Error, operation: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ConfigError::Io {
            source,
            operation: operation.into(),
            path: path.into(),
        }
    }

    pub(crate) fn stream(format: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| ConfigError::Stream { format, source }
    }

    /// True for the domain "does not exist" error and for I/O errors whose
    /// kind is [`io::ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::NotFound(_) => true,
            ConfigError::Io { source, .. } | ConfigError::Stream { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// True for the domain "already exists" error and for I/O errors whose
    /// kind is [`io::ErrorKind::AlreadyExists`].
    pub fn is_already_exists(&self) -> bool {
        match self {
            ConfigError::AlreadyExists(_) => true,
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::AlreadyExists,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_operation_and_path() {
        let err = ConfigError::io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            "open_read",
            "/tmp/app/settings.json",
        );
        let msg = err.to_string();
        assert!(msg.contains("open_read"));
        assert!(msg.contains("/tmp/app/settings.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ConfigError::NotFound("a.toml".into()).is_not_found());
        let io_missing = ConfigError::io(io::Error::from(io::ErrorKind::NotFound), "stat", "x");
        assert!(io_missing.is_not_found());
        assert!(!ConfigError::AlreadyExists("a.toml".into()).is_not_found());
    }

    #[test]
    fn test_domain_messages_carry_file_name() {
        assert_eq!(ConfigError::NotFound("users.json".into()).to_string(), "'users.json' does not exist");
        assert_eq!(ConfigError::AlreadyExists("users.json".into()).to_string(), "'users.json' already exists");
        assert!(ConfigError::AlreadyExists("x".into()).is_already_exists());
    }

    #[test]
    fn test_json_error_is_transparent() {
        let source = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let expected = source.to_string();
        let err: ConfigError = source.into();
        assert_eq!(err.to_string(), expected);
    }
}
